//! Trigger Message command

use rust_ocpp::v1_6::messages::trigger_message::{TriggerMessageRequest, TriggerMessageResponse};
use rust_ocpp::v1_6::types::{MessageTrigger, TriggerMessageStatus};
use tracing::info;

use super::{CommandError, SharedCommandSender};

/// Message type to trigger
#[derive(Debug, Clone, Copy)]
pub enum TriggerType {
    BootNotification,
    DiagnosticsStatusNotification,
    FirmwareStatusNotification,
    Heartbeat,
    MeterValues,
    StatusNotification,
}

impl From<TriggerType> for MessageTrigger {
    fn from(trigger: TriggerType) -> Self {
        match trigger {
            TriggerType::BootNotification => MessageTrigger::BootNotification,
            TriggerType::DiagnosticsStatusNotification => {
                MessageTrigger::DiagnosticsStatusNotification
            }
            TriggerType::FirmwareStatusNotification => MessageTrigger::FirmwareStatusNotification,
            TriggerType::Heartbeat => MessageTrigger::Heartbeat,
            TriggerType::MeterValues => MessageTrigger::MeterValues,
            TriggerType::StatusNotification => MessageTrigger::StatusNotification,
        }
    }
}

/// Trigger a message from the charge point
pub async fn trigger_message(
    command_sender: &SharedCommandSender,
    charge_point_id: &str,
    requested_message: TriggerType,
    connector_id: Option<u32>,
) -> Result<TriggerMessageStatus, CommandError> {
    info!(
        charge_point_id,
        ?requested_message,
        ?connector_id,
        "TriggerMessage"
    );

    let req = TriggerMessageRequest {
        requested_message: requested_message.into(),
        connector_id: connector_id.map(|id| id as i32),
    };
    let payload =
        serde_json::to_value(&req).map_err(|e| CommandError::SendFailed(e.to_string()))?;

    let result = command_sender
        .send_command(charge_point_id, "TriggerMessage", payload)
        .await?;

    let resp: TriggerMessageResponse = serde_json::from_value(result)
        .map_err(|e| CommandError::InvalidResponse(e.to_string()))?;

    Ok(resp.status)
}
