use crate::error::GatewayResult;
use crate::mappings::SpeakerMapping;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a save call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub success: bool,
    pub mappings: Vec<SpeakerMapping>,
    pub message: String,
}

/// Durable, cross-session, per-transcription mapping storage.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Persist the full mapping set for a transcription. Rejects an empty
    /// list or duplicate speaker ids with a validation error. Last save
    /// wins across concurrent writers.
    async fn save(
        &self,
        transcription_id: &str,
        mappings: Vec<SpeakerMapping>,
    ) -> GatewayResult<SaveOutcome>;

    /// Fetch the mappings for a transcription; `None` when unknown.
    async fn get(&self, transcription_id: &str) -> GatewayResult<Option<Vec<SpeakerMapping>>>;

    /// Delete the mappings for a transcription. Returns whether anything
    /// was found and deleted.
    async fn delete(&self, transcription_id: &str) -> GatewayResult<bool>;
}

/// Server-mirrored per-session override tracking.
#[async_trait]
pub trait SessionOverrideGateway: Send + Sync {
    async fn apply_override(
        &self,
        session_id: &str,
        speaker_id: &str,
        new_name: &str,
    ) -> GatewayResult<()>;

    /// Mirror a revert. Reverting a speaker with no recorded override is a
    /// no-op: the mirror only reflects what the client tracked.
    async fn revert_override(&self, session_id: &str, speaker_id: &str) -> GatewayResult<()>;

    /// Drop every override recorded for the session.
    async fn clear_session(&self, session_id: &str) -> GatewayResult<()>;
}

// ============================================================================
// Wire types (shared by the HTTP handlers and the client gateway)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMappingsRequest {
    pub transcription_id: String,
    pub mappings: Vec<SpeakerMapping>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMappingsResponse {
    pub success: bool,
    pub transcription_id: String,
    pub mappings: Vec<SpeakerMapping>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOverrideRequest {
    pub speaker_id: String,
    pub new_name: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRevertRequest {
    pub speaker_id: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClearRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
