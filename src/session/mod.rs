//! Session lifecycle management
//!
//! This module provides the tab-scoped session abstraction:
//! - Session identity and activity timestamps
//! - Timeout / warning / expiry state machine
//! - Per-speaker override audit log (single-slot, last-write-wins)
//! - Subscriber notification and the periodic expiry ticker

mod audit;
mod manager;
mod record;
mod ticker;

pub use audit::OverrideAuditLog;
pub use manager::{
    ClearReason, SessionEvent, SessionLifecycleManager, SessionTimeouts, SubscriptionToken,
};
pub use record::{OverrideAction, OverrideKind, SessionPhase, SessionRecord, SessionStatus};
pub use ticker::spawn_expiry_ticker;
