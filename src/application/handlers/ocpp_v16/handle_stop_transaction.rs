//! StopTransaction handler

use rust_ocpp::v1_6::messages::stop_transaction::{
    StopTransactionRequest, StopTransactionResponse,
};
use rust_ocpp::v1_6::types::{AuthorizationStatus, IdTagInfo};
use serde_json::Value;
use tracing::{error, info};

use crate::application::events::{Event, TransactionStoppedEvent};
use crate::application::OcppHandlerV16;

pub async fn handle_stop_transaction(handler: &OcppHandlerV16, payload: &Value) -> Value {
    let req: StopTransactionRequest = match serde_json::from_value(payload.clone()) {
        Ok(r) => r,
        Err(e) => {
            error!(charge_point_id = handler.charge_point_id.as_str(), error = %e, "Failed to parse StopTransaction");
            return serde_json::json!({});
        }
    };

    info!(
        charge_point_id = handler.charge_point_id.as_str(),
        transaction_id = req.transaction_id,
        meter_stop = req.meter_stop,
        "StopTransaction"
    );

    let transaction_id = req.transaction_id;

    let stop_result = handler
        .service
        .stop_transaction(
            transaction_id,
            req.meter_stop,
            req.reason.as_ref().map(|r| format!("{:?}", r)),
        )
        .await;

    if let Err(e) = &stop_result {
        error!(
            charge_point_id = handler.charge_point_id.as_str(),
            transaction_id,
            error = %e,
            "Failed to stop transaction"
        );
    }

    if let Ok(transaction) = &stop_result {
        let energy_kwh = transaction
            .energy_consumed_wh()
            .map(|wh| wh as f64 / 1000.0)
            .unwrap_or(0.0);

        handler.event_bus.publish(Event::TransactionStopped(TransactionStoppedEvent {
            charge_point_id: handler.charge_point_id.clone(),
            transaction_id,
            id_tag: req.id_tag.clone(),
            meter_stop: req.meter_stop,
            energy_consumed_kwh: energy_kwh,
            reason: req.reason.as_ref().map(|r| format!("{:?}", r)),
            timestamp: req.timestamp,
        }));
    }

    let response = StopTransactionResponse {
        id_tag_info: Some(IdTagInfo {
            status: AuthorizationStatus::Accepted,
            expiry_date: None,
            parent_id_tag: None,
        }),
    };

    serde_json::to_value(&response).unwrap_or_default()
}
