use super::contract::{
    PersistenceGateway, SaveMappingsRequest, SaveMappingsResponse, SaveOutcome,
    SessionClearRequest, SessionOverrideGateway, SessionOverrideRequest, SessionRevertRequest,
    SuccessResponse,
};
use crate::error::{GatewayError, GatewayResult};
use crate::mappings::SpeakerMapping;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// HTTP client for the mapping persistence and session override endpoints.
///
/// Save calls carry a monotonically increasing sequence number; a response
/// that comes back after a newer save was issued is discarded instead of
/// applied, so an out-of-order reply can never clobber fresher state.
/// Failed calls surface as [`GatewayError::Transient`] and leave caller
/// state untouched.
pub struct HttpGatewayClient {
    base_url: String,
    http: reqwest::Client,
    save_seq: AtomicU64,
}

impl HttpGatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            save_seq: AtomicU64::new(0),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_success(&self, path: &str, body: &impl serde::Serialize) -> GatewayResult<()> {
        let response = self.http.post(self.url(path)).json(body).send().await?;

        if !response.status().is_success() {
            return Err(GatewayError::Transient(format!(
                "{} returned {}",
                path,
                response.status()
            )));
        }

        let outcome: SuccessResponse = response.json().await?;
        if !outcome.success {
            return Err(GatewayError::Transient(format!(
                "{} reported failure",
                path
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for HttpGatewayClient {
    async fn save(
        &self,
        transcription_id: &str,
        mappings: Vec<SpeakerMapping>,
    ) -> GatewayResult<SaveOutcome> {
        let sequence = self.save_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let request = SaveMappingsRequest {
            transcription_id: transcription_id.to_string(),
            mappings,
        };

        let response = self
            .http
            .post(self.url("/speaker-mappings"))
            .json(&request)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                // A newer save was issued while this one was in flight;
                // its response is authoritative, not this one.
                if self.save_seq.load(Ordering::SeqCst) > sequence {
                    warn!(sequence, "discarding stale save response");
                    return Err(GatewayError::StaleResponse { sequence });
                }

                let body: SaveMappingsResponse = response.json().await?;
                debug!(
                    transcription_id,
                    count = body.mappings.len(),
                    "mappings saved"
                );
                Ok(SaveOutcome {
                    success: body.success,
                    mappings: body.mappings,
                    message: body.message,
                })
            }
            StatusCode::BAD_REQUEST => {
                let detail = response.text().await.unwrap_or_default();
                Err(GatewayError::Validation(detail))
            }
            status => Err(GatewayError::Transient(format!(
                "save returned {}",
                status
            ))),
        }
    }

    async fn get(&self, transcription_id: &str) -> GatewayResult<Option<Vec<SpeakerMapping>>> {
        let response = self
            .http
            .get(self.url(&format!("/speaker-mappings/{}", transcription_id)))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(Some(response.json().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(GatewayError::Transient(format!("get returned {}", status))),
        }
    }

    async fn delete(&self, transcription_id: &str) -> GatewayResult<bool> {
        let response = self
            .http
            .delete(self.url(&format!("/speaker-mappings/{}", transcription_id)))
            .send()
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(GatewayError::Transient(format!(
                "delete returned {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl SessionOverrideGateway for HttpGatewayClient {
    async fn apply_override(
        &self,
        session_id: &str,
        speaker_id: &str,
        new_name: &str,
    ) -> GatewayResult<()> {
        let request = SessionOverrideRequest {
            speaker_id: speaker_id.to_string(),
            new_name: new_name.to_string(),
            session_id: session_id.to_string(),
        };
        self.post_success("/session-override", &request).await
    }

    async fn revert_override(&self, session_id: &str, speaker_id: &str) -> GatewayResult<()> {
        let request = SessionRevertRequest {
            speaker_id: speaker_id.to_string(),
            session_id: session_id.to_string(),
        };
        self.post_success("/session-revert", &request).await
    }

    async fn clear_session(&self, session_id: &str) -> GatewayResult<()> {
        let request = SessionClearRequest {
            session_id: session_id.to_string(),
        };
        self.post_success("/session-clear", &request).await
    }
}
