use super::state::AppState;
use crate::error::GatewayError;
use crate::gateway::{
    SaveMappingsRequest, SaveMappingsResponse, SessionClearRequest, SessionOverrideGateway,
    SessionOverrideRequest, SessionRevertRequest, SuccessResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /speaker-mappings
/// Persist the full mapping set for a transcription
pub async fn save_mappings(
    State(state): State<AppState>,
    Json(req): Json<SaveMappingsRequest>,
) -> impl IntoResponse {
    info!(
        transcription_id = %req.transcription_id,
        count = req.mappings.len(),
        "saving speaker mappings"
    );

    match state.mappings.save(&req.transcription_id, req.mappings).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(SaveMappingsResponse {
                success: outcome.success,
                transcription_id: req.transcription_id,
                mappings: outcome.mappings,
                message: outcome.message,
            }),
        )
            .into_response(),
        Err(GatewayError::Validation(detail)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: detail }),
        )
            .into_response(),
        Err(e) => {
            error!("failed to save mappings: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to save mappings: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /speaker-mappings/:transcription_id
pub async fn get_mappings(
    State(state): State<AppState>,
    Path(transcription_id): Path<String>,
) -> impl IntoResponse {
    match state.mappings.get(&transcription_id).await {
        Some(mappings) => (StatusCode::OK, Json(mappings)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No mappings found for transcription {}", transcription_id),
            }),
        )
            .into_response(),
    }
}

/// DELETE /speaker-mappings/:transcription_id
pub async fn delete_mappings(
    State(state): State<AppState>,
    Path(transcription_id): Path<String>,
) -> impl IntoResponse {
    if state.mappings.delete(&transcription_id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No mappings found for transcription {}", transcription_id),
            }),
        )
            .into_response()
    }
}

/// POST /session-override
/// Mirror a speaker override for a session
pub async fn apply_session_override(
    State(state): State<AppState>,
    Json(req): Json<SessionOverrideRequest>,
) -> impl IntoResponse {
    match state
        .overrides
        .apply_override(&req.session_id, &req.speaker_id, &req.new_name)
        .await
    {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(e) => {
            error!("failed to mirror override: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SuccessResponse { success: false }),
            )
                .into_response()
        }
    }
}

/// POST /session-revert
pub async fn revert_session_override(
    State(state): State<AppState>,
    Json(req): Json<SessionRevertRequest>,
) -> impl IntoResponse {
    match state
        .overrides
        .revert_override(&req.session_id, &req.speaker_id)
        .await
    {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(e) => {
            error!("failed to mirror revert: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SuccessResponse { success: false }),
            )
                .into_response()
        }
    }
}

/// POST /session-clear
pub async fn clear_session(
    State(state): State<AppState>,
    Json(req): Json<SessionClearRequest>,
) -> impl IntoResponse {
    match state.overrides.clear_session(&req.session_id).await {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(e) => {
            error!("failed to clear session mirror: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SuccessResponse { success: false }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
