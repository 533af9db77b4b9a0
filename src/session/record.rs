use super::audit::OverrideAuditLog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of override action was taken for a speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverrideKind {
    Override,
    Revert,
    Clear,
}

/// Last action taken for one speaker. A new action replaces the prior one,
/// giving single-level auditability rather than a full history stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideAction {
    pub action: OverrideKind,
    pub original_value: String,
    pub new_value: String,
    pub field_modified: String,
    pub timestamp: DateTime<Utc>,
}

impl OverrideAction {
    /// Build the audit entry for a new override.
    pub fn override_of(
        original_value: &str,
        new_value: &str,
        field_modified: &str,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            action: OverrideKind::Override,
            original_value: original_value.to_string(),
            new_value: new_value.to_string(),
            field_modified: field_modified.to_string(),
            timestamp: at,
        }
    }

    /// Build the audit entry recording a revert of `prior`.
    ///
    /// The revert is a new action, not an erasure: its `original_value`
    /// comes from the action being reverted and its `new_value` is the
    /// label the speaker is restored to.
    pub fn revert_of(prior: &OverrideAction, at: DateTime<Utc>) -> Self {
        Self {
            action: OverrideKind::Revert,
            original_value: prior.original_value.clone(),
            new_value: prior.original_value.clone(),
            field_modified: prior.field_modified.clone(),
            timestamp: at,
        }
    }
}

/// Tab-scoped session state. Created once per session, mutated on every
/// tracked action, destroyed and regenerated on clear/expiry.
///
/// Serializes to the persisted session shape:
/// `{sessionId, sessionStarted, lastActivity, sessionExtensions, overrides}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: String,
    pub session_started: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Accumulated minutes added by the user via extend.
    pub session_extensions: i64,
    pub overrides: OverrideAuditLog,
}

impl SessionRecord {
    /// Mint a fresh record with an unguessable session id.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            session_started: now,
            last_activity: now,
            session_extensions: 0,
            overrides: OverrideAuditLog::default(),
        }
    }
}

/// Where the session sits in its timeout window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Active,
    Warning,
    Expired,
}

/// Derived session snapshot, computed on demand and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub session_id: String,
    pub is_active: bool,
    pub phase: SessionPhase,
    /// Seconds since the session started.
    pub session_duration_secs: i64,
    /// Size of the serialized session record in bytes.
    pub data_size_bytes: usize,
    pub has_overrides: bool,
    pub override_count: usize,
}
