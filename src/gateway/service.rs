use super::contract::{PersistenceGateway, SaveOutcome, SessionOverrideGateway};
use crate::clock::Clock;
use crate::error::{GatewayError, GatewayResult};
use crate::mappings::SpeakerMapping;
use crate::session::{OverrideAction, OverrideAuditLog};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// In-memory per-transcription mapping storage, the durable side of the
/// persistence contract.
///
/// Concurrent saves for the same transcription resolve last-save-wins with
/// no conflict detection. That is the recorded product decision for
/// multi-tab editing, not an oversight.
#[derive(Clone, Default)]
pub struct MappingService {
    store: Arc<RwLock<HashMap<String, Vec<SpeakerMapping>>>>,
}

impl MappingService {
    pub fn new() -> Self {
        Self::default()
    }

    fn validate(transcription_id: &str, mappings: &[SpeakerMapping]) -> GatewayResult<()> {
        if mappings.is_empty() {
            return Err(GatewayError::Validation(format!(
                "no mappings provided for transcription {}",
                transcription_id
            )));
        }

        let mut seen = HashSet::new();
        for mapping in mappings {
            if !seen.insert(mapping.speaker_id.as_str()) {
                return Err(GatewayError::Validation(format!(
                    "duplicate speaker id: {}",
                    mapping.speaker_id
                )));
            }
        }

        Ok(())
    }

    pub async fn save(
        &self,
        transcription_id: &str,
        mut mappings: Vec<SpeakerMapping>,
    ) -> GatewayResult<SaveOutcome> {
        Self::validate(transcription_id, &mappings)?;

        // Stored mappings always carry the transcription they were saved
        // under, whatever the client sent.
        for mapping in &mut mappings {
            mapping.transcription_id = transcription_id.to_string();
        }

        let count = mappings.len();
        {
            let mut store = self.store.write().await;
            store.insert(transcription_id.to_string(), mappings.clone());
        }

        info!(transcription_id, count, "speaker mappings saved");

        Ok(SaveOutcome {
            success: true,
            mappings,
            message: format!("Saved {} speaker mapping(s)", count),
        })
    }

    pub async fn get(&self, transcription_id: &str) -> Option<Vec<SpeakerMapping>> {
        let store = self.store.read().await;
        store.get(transcription_id).cloned()
    }

    pub async fn delete(&self, transcription_id: &str) -> bool {
        let mut store = self.store.write().await;
        let deleted = store.remove(transcription_id).is_some();
        if deleted {
            info!(transcription_id, "speaker mappings deleted");
        }
        deleted
    }
}

#[async_trait]
impl PersistenceGateway for MappingService {
    async fn save(
        &self,
        transcription_id: &str,
        mappings: Vec<SpeakerMapping>,
    ) -> GatewayResult<SaveOutcome> {
        MappingService::save(self, transcription_id, mappings).await
    }

    async fn get(&self, transcription_id: &str) -> GatewayResult<Option<Vec<SpeakerMapping>>> {
        Ok(MappingService::get(self, transcription_id).await)
    }

    async fn delete(&self, transcription_id: &str) -> GatewayResult<bool> {
        Ok(MappingService::delete(self, transcription_id).await)
    }
}

/// Server-side mirror of one session's override activity.
#[derive(Debug, Clone)]
struct SessionMirror {
    overrides: OverrideAuditLog,
    last_activity: DateTime<Utc>,
}

/// Server-mirrored session override tracking.
///
/// Holds one override log per session id, keyed last-write-wins per
/// speaker like the client-side audit log. Idle sessions are swept by
/// `prune_expired` so the privacy timeout also holds server-side.
#[derive(Clone)]
pub struct SessionOverrideService {
    sessions: Arc<RwLock<HashMap<String, SessionMirror>>>,
    clock: Arc<dyn Clock>,
}

impl SessionOverrideService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Overrides currently mirrored for a session, if any.
    pub async fn overrides(&self, session_id: &str) -> Option<OverrideAuditLog> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).map(|m| m.overrides.clone())
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions idle longer than `timeout`. Returns how many were
    /// removed.
    pub async fn prune_expired(&self, timeout: Duration) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, mirror| now - mirror.last_activity < timeout);
        let removed = before - sessions.len();
        if removed > 0 {
            info!(removed, "pruned expired session mirrors");
        }
        removed
    }

    /// Drop every mirrored session. Used by the shutdown hook.
    pub async fn clear_all(&self) {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        sessions.clear();
        if count > 0 {
            info!(count, "cleared all session mirrors on shutdown");
        }
    }
}

#[async_trait]
impl SessionOverrideGateway for SessionOverrideService {
    async fn apply_override(
        &self,
        session_id: &str,
        speaker_id: &str,
        new_name: &str,
    ) -> GatewayResult<()> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;

        let mirror = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionMirror {
                overrides: OverrideAuditLog::default(),
                last_activity: now,
            });

        // The value being replaced: the previous override's result, or the
        // raw label if this is the first override for the speaker.
        let original = mirror
            .overrides
            .get(speaker_id)
            .map(|prior| prior.new_value.clone())
            .unwrap_or_else(|| speaker_id.to_string());

        mirror
            .overrides
            .record(speaker_id, OverrideAction::override_of(&original, new_name, "name", now));
        mirror.last_activity = now;

        debug!(session_id, speaker_id, "session override mirrored");
        Ok(())
    }

    async fn revert_override(&self, session_id: &str, speaker_id: &str) -> GatewayResult<()> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;

        let Some(mirror) = sessions.get_mut(session_id) else {
            return Ok(());
        };
        let Some(prior) = mirror.overrides.get(speaker_id).cloned() else {
            return Ok(());
        };

        mirror
            .overrides
            .record(speaker_id, OverrideAction::revert_of(&prior, now));
        mirror.last_activity = now;

        debug!(session_id, speaker_id, "session revert mirrored");
        Ok(())
    }

    async fn clear_session(&self, session_id: &str) -> GatewayResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(session_id).is_some() {
            info!(session_id, "session mirror cleared");
        }
        Ok(())
    }
}
