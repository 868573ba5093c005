//! Application layer - business logic and handlers

pub mod commands;
pub mod events;
pub mod handlers;
pub mod ports;
pub mod services;
pub mod session;

pub use commands::{
    change_availability, change_configuration, clear_cache, data_transfer,
    get_configuration, get_local_list_version, remote_start_transaction,
    remote_stop_transaction, reset, trigger_message, unlock_connector, Availability,
    CommandError, CommandSender, ConfigurationResult, DataTransferResult, ResetKind,
    SharedCommandSender, TriggerType,
};
pub use handlers::{OcppHandler, OcppHandlerV16, OcppHandlerV201};
pub use services::ChargePointService;
pub use session::{SessionRegistry, SharedSessionRegistry};
