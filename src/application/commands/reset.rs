//! Reset command

use rust_ocpp::v1_6::messages::reset::{ResetRequest, ResetResponse};
use rust_ocpp::v1_6::types::{ResetStatus, ResetType};
use tracing::info;

use super::{CommandError, SharedCommandSender};

/// Reset type for the charge point
#[derive(Debug, Clone, Copy)]
pub enum ResetKind {
    /// Soft reset - restart without power cycle
    Soft,
    /// Hard reset - full power cycle
    Hard,
}

impl From<ResetKind> for ResetType {
    fn from(kind: ResetKind) -> Self {
        match kind {
            ResetKind::Soft => ResetType::Soft,
            ResetKind::Hard => ResetType::Hard,
        }
    }
}

/// Reset a charge point
pub async fn reset(
    command_sender: &SharedCommandSender,
    charge_point_id: &str,
    reset_type: ResetKind,
) -> Result<ResetStatus, CommandError> {
    info!(charge_point_id, ?reset_type, "Reset");

    let req = ResetRequest {
        ty: reset_type.into(),
    };
    let payload =
        serde_json::to_value(&req).map_err(|e| CommandError::SendFailed(e.to_string()))?;

    let result = command_sender
        .send_command(charge_point_id, "Reset", payload)
        .await?;

    let resp: ResetResponse = serde_json::from_value(result)
        .map_err(|e| CommandError::InvalidResponse(e.to_string()))?;

    Ok(resp.status)
}
