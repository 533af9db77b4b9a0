//! Error taxonomy for the persistence and session-override gateways.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur when talking to the mapping persistence layer or
/// the server-side session override mirror.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Recoverable input problem (empty mapping list, duplicate speaker ids,
    /// missing name). Surfaced inline per speaker; blocks only that save.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unknown transcription id on get/delete. Callers treat this as an
    /// absent/empty state, not a failure.
    #[error("transcription not found: {0}")]
    NotFound(String),

    /// Network or server failure on a save/override call. Local state is
    /// left unchanged so user input survives a failed save.
    #[error("transient network error: {0}")]
    Transient(String),

    /// A save response arrived after a newer save was issued; the result
    /// must be discarded rather than applied.
    #[error("stale response discarded for save #{sequence}")]
    StaleResponse { sequence: u64 },

    /// The local session expired while the call was in flight.
    #[error("session expired")]
    SessionExpired,
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transient(err.to_string())
    }
}
