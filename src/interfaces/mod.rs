//! Delivery mechanisms
//!
//! - `ws`: charge-point WebSocket connections, speaking OCPP-J over
//!   negotiated `ocpp1.6`/`ocpp2.0.1` subprotocols.

pub mod ws;
