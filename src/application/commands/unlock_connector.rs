//! Unlock Connector command

use rust_ocpp::v1_6::messages::unlock_connector::{UnlockConnectorRequest, UnlockConnectorResponse};
use rust_ocpp::v1_6::types::UnlockStatus;
use tracing::info;

use super::{CommandError, SharedCommandSender};

/// Unlock a connector on a charge point
pub async fn unlock_connector(
    command_sender: &SharedCommandSender,
    charge_point_id: &str,
    connector_id: u32,
) -> Result<UnlockStatus, CommandError> {
    info!(charge_point_id, connector_id, "UnlockConnector");

    let req = UnlockConnectorRequest {
        connector_id: connector_id as i32,
    };
    let payload =
        serde_json::to_value(&req).map_err(|e| CommandError::SendFailed(e.to_string()))?;

    let result = command_sender
        .send_command(charge_point_id, "UnlockConnector", payload)
        .await?;

    let resp: UnlockConnectorResponse = serde_json::from_value(result)
        .map_err(|e| CommandError::InvalidResponse(e.to_string()))?;

    Ok(resp.status)
}
