//! Data Transfer command

use rust_ocpp::v1_6::messages::data_transfer::{DataTransferRequest, DataTransferResponse};
use rust_ocpp::v1_6::types::DataTransferStatus;
use tracing::info;

use super::{CommandError, SharedCommandSender};

/// Data transfer result
#[derive(Debug)]
pub struct DataTransferResult {
    /// Status: Accepted, Rejected, UnknownMessageId, UnknownVendorId
    pub status: DataTransferStatus,
    /// Optional data returned from the charge point
    pub data: Option<String>,
}

/// Send vendor-specific data to a charge point
///
/// Used for proprietary extensions to the OCPP protocol
pub async fn data_transfer(
    command_sender: &SharedCommandSender,
    charge_point_id: &str,
    vendor_id: String,
    message_id: Option<String>,
    data: Option<String>,
) -> Result<DataTransferResult, CommandError> {
    info!(charge_point_id, vendor_id = vendor_id.as_str(), ?message_id, "DataTransfer");

    let req = DataTransferRequest {
        vendor_string: vendor_id,
        message_id,
        data,
    };
    let payload =
        serde_json::to_value(&req).map_err(|e| CommandError::SendFailed(e.to_string()))?;

    let result = command_sender
        .send_command(charge_point_id, "DataTransfer", payload)
        .await?;

    let resp: DataTransferResponse = serde_json::from_value(result)
        .map_err(|e| CommandError::InvalidResponse(e.to_string()))?;

    Ok(DataTransferResult {
        status: resp.status,
        data: resp.data,
    })
}
