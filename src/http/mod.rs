//! HTTP API for speaker mapping persistence and the session override mirror
//!
//! Routes:
//! - `POST /speaker-mappings` — save the mapping set for a transcription
//! - `GET /speaker-mappings/:transcription_id` — fetch saved mappings
//! - `DELETE /speaker-mappings/:transcription_id` — delete saved mappings
//! - `POST /session-override` / `/session-revert` / `/session-clear`
//! - `GET /health`

mod handlers;
mod routes;
mod state;

pub use handlers::ErrorResponse;
pub use routes::create_router;
pub use state::AppState;
