use crate::clock::Clock;
use crate::gateway::{MappingService, SessionOverrideService};
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Durable per-transcription mapping storage
    pub mappings: MappingService,

    /// Server-side mirror of per-session override activity
    pub overrides: SessionOverrideService,
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            mappings: MappingService::new(),
            overrides: SessionOverrideService::new(clock),
        }
    }
}
