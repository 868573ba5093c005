//! Change Configuration command

use rust_ocpp::v1_6::messages::change_configuration::{
    ChangeConfigurationRequest, ChangeConfigurationResponse,
};
use rust_ocpp::v1_6::types::ConfigurationStatus;
use tracing::info;

use super::{CommandError, SharedCommandSender};

/// Change a configuration key on a charge point
///
/// Returns the status: Accepted, Rejected, RebootRequired, NotSupported
pub async fn change_configuration(
    command_sender: &SharedCommandSender,
    charge_point_id: &str,
    key: String,
    value: String,
) -> Result<ConfigurationStatus, CommandError> {
    info!(charge_point_id, key = key.as_str(), value = value.as_str(), "ChangeConfiguration");

    let req = ChangeConfigurationRequest { key, value };
    let payload =
        serde_json::to_value(&req).map_err(|e| CommandError::SendFailed(e.to_string()))?;

    let result = command_sender
        .send_command(charge_point_id, "ChangeConfiguration", payload)
        .await?;

    let resp: ChangeConfigurationResponse = serde_json::from_value(result)
        .map_err(|e| CommandError::InvalidResponse(e.to_string()))?;

    Ok(resp.status)
}
