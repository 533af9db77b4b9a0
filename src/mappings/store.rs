use super::types::{MappingSource, SpeakerMapping};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Reactive collection of speaker → identity mappings for the active
/// transcription.
///
/// The detected speaker ids are the ground truth for "speakers needing
/// mapping": manually added speakers outside that set are permitted but
/// excluded from mapped/unmapped accounting. Selectors are recomputed on
/// every call, never cached.
#[derive(Debug, Default)]
pub struct SpeakerMappingStore {
    transcription_id: Option<String>,
    detected_speaker_ids: Vec<String>,
    mappings: HashMap<String, SpeakerMapping>,
}

impl SpeakerMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store for a transcription.
    ///
    /// Continuing the same transcription with already-known detected
    /// speakers preserves `detected_speaker_ids` and replaces only the
    /// mappings; anything else starts fully fresh.
    pub fn initialize(
        &mut self,
        transcription_id: &str,
        detected_speaker_ids: Vec<String>,
        existing_mappings: Vec<SpeakerMapping>,
    ) {
        let continuing = self.transcription_id.as_deref() == Some(transcription_id)
            && !self.detected_speaker_ids.is_empty();

        if continuing {
            debug!(
                transcription_id,
                "continuing transcription, replacing mappings only"
            );
        } else {
            self.transcription_id = Some(transcription_id.to_string());
            self.detected_speaker_ids = detected_speaker_ids;
        }

        self.mappings = existing_mappings
            .into_iter()
            .map(|m| (m.speaker_id.clone(), m))
            .collect();
    }

    pub fn transcription_id(&self) -> Option<&str> {
        self.transcription_id.as_deref()
    }

    pub fn detected_speaker_ids(&self) -> &[String] {
        &self.detected_speaker_ids
    }

    /// Add a mapping for a speaker. First write wins: if the speaker is
    /// already mapped the call is a no-op and logs a warning.
    pub fn add(&mut self, speaker_id: &str, name: &str, role: Option<&str>) {
        if self.mappings.contains_key(speaker_id) {
            warn!(speaker_id, "speaker already mapped, ignoring add");
            return;
        }

        let source = if self.detected_speaker_ids.iter().any(|s| s == speaker_id) {
            MappingSource::AutoDetected
        } else {
            MappingSource::ManuallyAdded
        };

        let mapping = SpeakerMapping {
            speaker_id: speaker_id.to_string(),
            name: name.to_string(),
            role: role.map(str::to_string),
            transcription_id: self.transcription_id.clone().unwrap_or_default(),
            source,
        };

        self.mappings.insert(speaker_id.to_string(), mapping);
    }

    /// Partial update of an existing mapping; no-op if the speaker is
    /// not mapped.
    pub fn update(&mut self, speaker_id: &str, name: Option<&str>, role: Option<&str>) {
        let Some(mapping) = self.mappings.get_mut(speaker_id) else {
            return;
        };

        if let Some(name) = name {
            mapping.name = name.to_string();
        }
        if let Some(role) = role {
            mapping.role = Some(role.to_string());
        }
    }

    /// Unconditional removal. The "keep at least one speaker" business rule
    /// lives in the calling layer, not here.
    pub fn delete(&mut self, speaker_id: &str) -> bool {
        self.mappings.remove(speaker_id).is_some()
    }

    pub fn get(&self, speaker_id: &str) -> Option<&SpeakerMapping> {
        self.mappings.get(speaker_id)
    }

    /// All current mappings, in detected-speaker order followed by manually
    /// added speakers.
    pub fn all_mappings(&self) -> Vec<SpeakerMapping> {
        let mut out: Vec<SpeakerMapping> = self
            .detected_speaker_ids
            .iter()
            .filter_map(|id| self.mappings.get(id).cloned())
            .collect();

        let mut extras: Vec<SpeakerMapping> = self
            .mappings
            .values()
            .filter(|m| !self.detected_speaker_ids.iter().any(|id| *id == m.speaker_id))
            .cloned()
            .collect();
        extras.sort_by(|a, b| a.speaker_id.cmp(&b.speaker_id));

        out.extend(extras);
        out
    }

    /// Count of detected speakers whose mapping has a non-empty trimmed name.
    pub fn mapped_count(&self) -> usize {
        self.detected_speaker_ids
            .iter()
            .filter(|id| self.mappings.get(*id).is_some_and(|m| m.has_name()))
            .count()
    }

    /// Detected speakers still lacking a non-empty name, in detected order.
    pub fn unmapped_speakers(&self) -> Vec<String> {
        self.detected_speaker_ids
            .iter()
            .filter(|id| !self.mappings.get(*id).is_some_and(|m| m.has_name()))
            .cloned()
            .collect()
    }

    /// Wipe everything. Wired to session clear/expiry.
    pub fn reset(&mut self) {
        self.transcription_id = None;
        self.detected_speaker_ids.clear();
        self.mappings.clear();
    }
}
