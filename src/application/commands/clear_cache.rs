//! Clear Cache command

use rust_ocpp::v1_6::messages::clear_cache::{ClearCacheRequest, ClearCacheResponse};
use rust_ocpp::v1_6::types::ClearCacheStatus;
use tracing::info;

use super::{CommandError, SharedCommandSender};

/// Clear the authorization cache on a charge point
///
/// Instructs the charge point to clear its local authorization cache.
/// Returns Accepted or Rejected.
pub async fn clear_cache(
    command_sender: &SharedCommandSender,
    charge_point_id: &str,
) -> Result<ClearCacheStatus, CommandError> {
    info!(charge_point_id, "ClearCache");

    let payload = serde_json::to_value(&ClearCacheRequest {})
        .map_err(|e| CommandError::SendFailed(e.to_string()))?;

    let result = command_sender
        .send_command(charge_point_id, "ClearCache", payload)
        .await?;

    let resp: ClearCacheResponse = serde_json::from_value(result)
        .map_err(|e| CommandError::InvalidResponse(e.to_string()))?;

    Ok(resp.status)
}
