//! Transaction domain entity — one charging session on one connector.

use chrono::{DateTime, Utc};

/// Transaction lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Active,
    Completed,
    Failed,
}

/// Unit a charging-profile limit (carried over from the Tx charging profile
/// bound at transaction start) is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargingLimitType {
    /// Limit on cumulative energy, in Wh.
    Energy,
    /// Limit on instantaneous power, in W.
    Power,
    /// Limit on state of charge, percent.
    Soc,
}

impl ChargingLimitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::Power => "Power",
            Self::Soc => "Soc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Energy" => Some(Self::Energy),
            "Power" => Some(Self::Power),
            "Soc" => Some(Self::Soc),
            _ => None,
        }
    }
}

/// A charging transaction, identified server-side once accepted. While the
/// charge point is offline, the connector instead tracks an
/// `offline_transaction_id` sentinel (see [`crate::domain::Connector`]) until
/// the FIFO-retained StartTransaction is acknowledged.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i32,
    pub charge_point_id: String,
    pub connector_id: u32,
    pub id_tag: String,
    pub parent_id_tag: Option<String>,
    pub meter_start: i32,
    pub meter_stop: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub stop_reason: Option<String>,
    pub status: TransactionStatus,
    pub last_meter_value: Option<i32>,
    pub last_meter_update: Option<DateTime<Utc>>,
    /// Instantaneous power reported by the most recent sampled MeterValues, in W.
    pub current_power_w: Option<f64>,
    /// State of charge reported by the most recent sampled MeterValues, percent.
    pub current_soc: Option<i32>,
    /// Limit applied from a TxProfile bound at transaction start, if any.
    pub limit_type: Option<ChargingLimitType>,
    pub limit_value: Option<f64>,
}

impl Transaction {
    pub fn new(
        id: i32,
        charge_point_id: impl Into<String>,
        connector_id: u32,
        id_tag: impl Into<String>,
        meter_start: i32,
    ) -> Self {
        Self {
            id,
            charge_point_id: charge_point_id.into(),
            connector_id,
            id_tag: id_tag.into(),
            parent_id_tag: None,
            meter_start,
            meter_stop: None,
            started_at: Utc::now(),
            stopped_at: None,
            stop_reason: None,
            status: TransactionStatus::Active,
            last_meter_value: None,
            last_meter_update: None,
            current_power_w: None,
            current_soc: None,
            limit_type: None,
            limit_value: None,
        }
    }

    pub fn stop(&mut self, meter_stop: i32, reason: Option<String>) {
        self.meter_stop = Some(meter_stop);
        self.stopped_at = Some(Utc::now());
        self.stop_reason = reason;
        self.status = TransactionStatus::Completed;
    }

    pub fn update_meter_data(
        &mut self,
        meter_value: Option<i32>,
        power_w: Option<f64>,
        soc: Option<i32>,
    ) {
        if let Some(mv) = meter_value {
            self.last_meter_value = Some(mv);
            self.last_meter_update = Some(Utc::now());
        }
        if power_w.is_some() {
            self.current_power_w = power_w;
        }
        if soc.is_some() {
            self.current_soc = soc;
        }
    }

    /// Energy consumed once the transaction has stopped, in Wh.
    pub fn energy_consumed_wh(&self) -> Option<i32> {
        self.meter_stop.map(|stop| stop - self.meter_start)
    }

    /// Energy consumed so far while the transaction is still active, in Wh.
    pub fn live_energy_consumed_wh(&self) -> Option<i32> {
        self.last_meter_value.map(|lmv| lmv - self.meter_start)
    }

    /// Same value as [`Self::energy_consumed_wh`], falling back to the live
    /// reading while the transaction is still active.
    pub fn energy_consumed(&self) -> Option<i32> {
        self.energy_consumed_wh().or_else(|| self.live_energy_consumed_wh())
    }

    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Active
    }

    /// True once the bound TxProfile limit has been met or exceeded.
    pub fn is_limit_reached(&self) -> bool {
        match (self.limit_type, self.limit_value) {
            (Some(ChargingLimitType::Energy), Some(limit)) => {
                self.live_energy_consumed_wh().map(|wh| wh as f64 >= limit).unwrap_or(false)
            }
            (Some(ChargingLimitType::Power), Some(limit)) => {
                self.current_power_w.map(|p| p >= limit).unwrap_or(false)
            }
            (Some(ChargingLimitType::Soc), Some(limit)) => {
                self.current_soc.map(|s| s as f64 >= limit).unwrap_or(false)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> Transaction {
        Transaction::new(1, "CP001", 1, "TAG-001", 1000)
    }

    #[test]
    fn new_transaction_is_active() {
        let tx = sample_tx();
        assert!(tx.is_active());
        assert_eq!(tx.meter_start, 1000);
        assert!(tx.meter_stop.is_none());
    }

    #[test]
    fn stop_sets_completed_and_duration_fields() {
        let mut tx = sample_tx();
        tx.stop(6000, Some("Local".into()));
        assert_eq!(tx.status, TransactionStatus::Completed);
        assert_eq!(tx.energy_consumed_wh(), Some(5000));
        assert!(tx.stopped_at.is_some());
        assert!(!tx.is_active());
    }

    #[test]
    fn live_energy_consumed_tracks_last_meter_value() {
        let mut tx = sample_tx();
        tx.update_meter_data(Some(3000), None, None);
        assert_eq!(tx.live_energy_consumed_wh(), Some(2000));
    }

    #[test]
    fn limit_reached_compares_live_energy_against_bound_limit() {
        let mut tx = sample_tx();
        tx.limit_type = Some(ChargingLimitType::Energy);
        tx.limit_value = Some(1500.0);
        assert!(!tx.is_limit_reached());
        tx.update_meter_data(Some(2600), None, None);
        assert!(tx.is_limit_reached());
    }
}
