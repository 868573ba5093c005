//! WebSocket interfaces
//!
//! - `ocpp_server`: charge-point connections, dispatched per negotiated
//!   OCPP version via `negotiator::ProtocolAdapters`
//! - `negotiator`: subprotocol negotiation and per-version adapter registry
//! - `ocpp_v16` / `ocpp_v201`: `OcppInboundPort` adapters for each version

pub mod negotiator;
pub mod ocpp_server;
pub mod ocpp_v16;
pub mod ocpp_v201;

pub use negotiator::{ProtocolAdapters, ProtocolNegotiator};
pub use ocpp_server::OcppServer;
