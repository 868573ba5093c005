//! # OCPP Central System
//!
//! OCPP 1.6 / 2.0.1 Central System implementation for managing EV charging stations.
//!
//! ## Architecture (Clean / SOLID)
//!
//! - **support**: Cross-cutting utilities (errors, shutdown, time, ID generation)
//! - **domain**: Core business entities, traits, and value objects
//! - **application**: Use-case orchestration, commands, events, handlers, ports
//! - **infrastructure**: External concerns (database persistence)
//! - **interfaces**: Delivery mechanisms (negotiated OCPP-J WebSocket)
//! - **config**: Application configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod support;

// Re-export commonly used types at crate root
pub use application::events::{create_event_bus, Event, EventBus, SharedEventBus};
pub use config::Config;
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::ws::OcppServer;
