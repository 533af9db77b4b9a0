pub mod clock;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod mappings;
pub mod session;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{GatewayError, GatewayResult};
pub use gateway::{
    HttpGatewayClient, MappingService, PersistenceGateway, SaveOutcome, SessionOverrideGateway,
    SessionOverrideService,
};
pub use http::{create_router, AppState};
pub use mappings::{MappingSource, SpeakerMapping, SpeakerMappingStore};
pub use session::{
    ClearReason, OverrideAction, OverrideAuditLog, OverrideKind, SessionEvent,
    SessionLifecycleManager, SessionPhase, SessionRecord, SessionStatus, SessionTimeouts,
    spawn_expiry_ticker,
};
pub use validation::{validate_all, validate_one, ValidationReport};
