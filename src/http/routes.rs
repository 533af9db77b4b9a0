use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Durable per-transcription mappings
        .route("/speaker-mappings", post(handlers::save_mappings))
        .route(
            "/speaker-mappings/:transcription_id",
            get(handlers::get_mappings),
        )
        .route(
            "/speaker-mappings/:transcription_id",
            delete(handlers::delete_mappings),
        )
        // Session override mirror
        .route("/session-override", post(handlers::apply_session_override))
        .route("/session-revert", post(handlers::revert_session_override))
        .route("/session-clear", post(handlers::clear_session))
        // Browser clients are anonymous and tab-scoped
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
