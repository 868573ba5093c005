//! Get Configuration command

use rust_ocpp::v1_6::messages::get_configuration::{
    GetConfigurationRequest, GetConfigurationResponse,
};
use rust_ocpp::v1_6::types::KeyValue;
use tracing::info;

use super::{CommandError, SharedCommandSender};

/// Configuration result from charge point
#[derive(Debug)]
pub struct ConfigurationResult {
    /// Known configuration keys with their values
    pub configuration_key: Vec<KeyValue>,
    /// Unknown configuration keys
    pub unknown_key: Vec<String>,
}

/// Get configuration from a charge point
///
/// If keys is None or empty, returns all configuration
pub async fn get_configuration(
    command_sender: &SharedCommandSender,
    charge_point_id: &str,
    keys: Option<Vec<String>>,
) -> Result<ConfigurationResult, CommandError> {
    info!(charge_point_id, ?keys, "GetConfiguration");

    let req = GetConfigurationRequest { key: keys };
    let payload =
        serde_json::to_value(&req).map_err(|e| CommandError::SendFailed(e.to_string()))?;

    let result = command_sender
        .send_command(charge_point_id, "GetConfiguration", payload)
        .await?;

    let resp: GetConfigurationResponse = serde_json::from_value(result)
        .map_err(|e| CommandError::InvalidResponse(e.to_string()))?;

    Ok(ConfigurationResult {
        configuration_key: resp.configuration_key.unwrap_or_default(),
        unknown_key: resp.unknown_key.unwrap_or_default(),
    })
}
