//! Inbound ports for per-connection OCPP message handling.
//!
//! The WebSocket delivery layer speaks only to these traits, not to any
//! concrete version handler. This keeps protocol-version dispatch out of
//! `interfaces::ws` and lets [`crate::interfaces::ws::negotiator::ProtocolAdapters`]
//! pick the right factory after subprotocol negotiation.

use async_trait::async_trait;

use crate::domain::OcppVersion;

/// A per-connection handler for one charge point's inbound OCPP traffic.
///
/// One instance is created per WebSocket connection, bound to a single
/// charge point id and OCPP version for the lifetime of that connection.
#[async_trait]
pub trait OcppInboundPort: Send + Sync {
    /// Handle one inbound text frame, returning the frame to send back
    /// (a CallResult/CallError for a Call, or `None` for a CallResult/CallError
    /// that was itself routed to a pending command).
    async fn handle_message(&self, text: &str) -> Option<String>;

    /// OCPP version this adapter was negotiated for.
    fn version(&self) -> OcppVersion;

    /// Charge point id this adapter is bound to.
    fn charge_point_id(&self) -> &str;
}

/// Creates [`OcppInboundPort`] instances for a specific OCPP version.
///
/// Registered in a `ProtocolAdapters` registry keyed by [`OcppVersion`];
/// the server looks up the factory for the negotiated version on connect.
pub trait OcppAdapterFactory: Send + Sync {
    /// Create a new inbound adapter bound to `charge_point_id`.
    fn create_inbound_adapter(&self, charge_point_id: String) -> Box<dyn OcppInboundPort>;

    /// OCPP version this factory builds adapters for.
    fn version(&self) -> OcppVersion;
}
