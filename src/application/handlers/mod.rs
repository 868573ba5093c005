//! OCPP message handlers

mod ocpp_v16;
mod ocpp_v16_handler;
pub mod ocpp_v201;
mod ocpp_v201_handler;

pub use ocpp_v16_handler::OcppHandlerV16;
pub use ocpp_v201_handler::OcppHandlerV201;

/// Default handler alias used by the single-protocol listener in
/// `interfaces::ws::ocpp_server`. The negotiator-based listener picks
/// between [`OcppHandlerV16`] and [`OcppHandlerV201`] explicitly.
pub use ocpp_v16_handler::OcppHandlerV16 as OcppHandler;
