//! Application events (pub/sub)

pub mod event_bus;

pub use crate::domain::events::*;
pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
