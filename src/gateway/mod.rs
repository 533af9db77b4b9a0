//! Persistence and session-override gateways
//!
//! The contract traits define the narrow boundary to durable mapping
//! storage and the server-side session mirror; `service` holds the
//! in-memory server implementations and `client` the HTTP client.

mod client;
mod contract;
mod service;

pub use client::HttpGatewayClient;
pub use contract::{
    PersistenceGateway, SaveMappingsRequest, SaveMappingsResponse, SaveOutcome,
    SessionClearRequest, SessionOverrideGateway, SessionOverrideRequest, SessionRevertRequest,
    SuccessResponse,
};
pub use service::{MappingService, SessionOverrideService};
