use super::record::OverrideAction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-speaker last-action record.
///
/// One slot per speaker id: recording a new action replaces the prior one
/// (last-write-wins). Timestamps stay materialized as time values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideAuditLog {
    entries: HashMap<String, OverrideAction>,
}

impl OverrideAuditLog {
    /// Store the action for a speaker, overwriting any prior slot.
    pub fn record(&mut self, speaker_id: &str, action: OverrideAction) {
        self.entries.insert(speaker_id.to_string(), action);
    }

    pub fn get(&self, speaker_id: &str) -> Option<&OverrideAction> {
        self.entries.get(speaker_id)
    }

    /// The full map of recorded actions.
    pub fn entries(&self) -> &HashMap<String, OverrideAction> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
