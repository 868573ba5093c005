//! OCPP 1.6 Action handlers
//!
//! Routes OCPP 1.6 action names to their respective handlers.
//! Actions are dispatched by string name (parsed from `OcppFrame::Call`).
//! Payloads are deserialized into `rust_ocpp::v1_6` types within each handler.

use serde_json::Value;
use tracing::error;

use crate::application::handlers::OcppHandlerV16;

mod handle_boot_notification;
mod handle_data_transfer;
mod handle_diagnostics_status_notification;
mod handle_firmware_status_notification;
mod handle_start_transaction;
mod handle_status_notification;
mod handle_stop_transaction;

pub use handle_boot_notification::handle_boot_notification;
pub use handle_data_transfer::handle_data_transfer;
pub use handle_diagnostics_status_notification::handle_diagnostics_status_notification;
pub use handle_firmware_status_notification::handle_firmware_status_notification;
pub use handle_start_transaction::handle_start_transaction;
pub use handle_status_notification::handle_status_notification;
pub use handle_stop_transaction::handle_stop_transaction;

/// Routes OCPP 1.6 actions to their respective handlers.
///
/// `action` is the string action name from the OCPP-J Call frame.
/// `payload` is the raw JSON payload. Each handler deserializes it
/// into the appropriate `rust_ocpp::v1_6` request type.
///
/// Returns a `serde_json::Value` representing the response payload.
pub async fn action_matcher(handler: &OcppHandlerV16, action: &str, payload: &Value) -> Value {
    match action {
        "BootNotification" => handle_boot_notification(handler, payload).await,
        "DataTransfer" => handle_data_transfer(handler, payload).await,
        "DiagnosticsStatusNotification" => {
            handle_diagnostics_status_notification(handler, payload).await
        }
        "FirmwareStatusNotification" => {
            handle_firmware_status_notification(handler, payload).await
        }
        "StartTransaction" => handle_start_transaction(handler, payload).await,
        "StatusNotification" => handle_status_notification(handler, payload).await,
        "StopTransaction" => handle_stop_transaction(handler, payload).await,

        unknown => {
            error!(
                charge_point_id = handler.charge_point_id.as_str(),
                action = unknown,
                "Unknown OCPP 1.6 action"
            );
            serde_json::json!({})
        }
    }
}
