//! Change Availability command

use rust_ocpp::v1_6::messages::change_availability::{
    ChangeAvailabilityRequest, ChangeAvailabilityResponse,
};
use rust_ocpp::v1_6::types::{AvailabilityStatus, AvailabilityType};
use tracing::info;

use super::{CommandError, SharedCommandSender};

/// Availability type for the connector
#[derive(Debug, Clone, Copy)]
pub enum Availability {
    /// Connector is operative
    Operative,
    /// Connector is inoperative
    Inoperative,
}

impl From<Availability> for AvailabilityType {
    fn from(availability: Availability) -> Self {
        match availability {
            Availability::Operative => AvailabilityType::Operative,
            Availability::Inoperative => AvailabilityType::Inoperative,
        }
    }
}

/// Change availability of a connector
///
/// Use connector_id = 0 to change availability of the entire charge point
pub async fn change_availability(
    command_sender: &SharedCommandSender,
    charge_point_id: &str,
    connector_id: u32,
    availability: Availability,
) -> Result<AvailabilityStatus, CommandError> {
    info!(charge_point_id, connector_id, ?availability, "ChangeAvailability");

    let req = ChangeAvailabilityRequest {
        connector_id: connector_id as i32,
        ty: availability.into(),
    };
    let payload =
        serde_json::to_value(&req).map_err(|e| CommandError::SendFailed(e.to_string()))?;

    let result = command_sender
        .send_command(charge_point_id, "ChangeAvailability", payload)
        .await?;

    let resp: ChangeAvailabilityResponse = serde_json::from_value(result)
        .map_err(|e| CommandError::InvalidResponse(e.to_string()))?;

    Ok(resp.status)
}
