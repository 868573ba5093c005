//! Get Local List Version command

use rust_ocpp::v1_6::messages::get_local_list_version::{
    GetLocalListVersionRequest, GetLocalListVersionResponse,
};
use tracing::info;

use super::{CommandError, SharedCommandSender};

/// Get the version of the local authorization list on a charge point
///
/// Returns the list version number. -1 means the list is not supported.
/// 0 means the list is empty.
pub async fn get_local_list_version(
    command_sender: &SharedCommandSender,
    charge_point_id: &str,
) -> Result<i32, CommandError> {
    info!(charge_point_id, "GetLocalListVersion");

    let payload = serde_json::to_value(&GetLocalListVersionRequest {})
        .map_err(|e| CommandError::SendFailed(e.to_string()))?;

    let result = command_sender
        .send_command(charge_point_id, "GetLocalListVersion", payload)
        .await?;

    let resp: GetLocalListVersionResponse = serde_json::from_value(result)
        .map_err(|e| CommandError::InvalidResponse(e.to_string()))?;

    Ok(resp.list_version)
}
