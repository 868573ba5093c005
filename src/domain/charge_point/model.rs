//! Charge Point aggregate: the registered charge point and its connectors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Connector availability/activity status (OCPP `ChargePointStatus` / 2.0.1 `ConnectorStatusEnumType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorStatus {
    Available,
    Preparing,
    Charging,
    SuspendedEV,
    SuspendedEVSE,
    Finishing,
    Reserved,
    Unavailable,
    Faulted,
}

impl ConnectorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Preparing => "Preparing",
            Self::Charging => "Charging",
            Self::SuspendedEV => "SuspendedEV",
            Self::SuspendedEVSE => "SuspendedEVSE",
            Self::Finishing => "Finishing",
            Self::Reserved => "Reserved",
            Self::Unavailable => "Unavailable",
            Self::Faulted => "Faulted",
        }
    }

    /// `true` for connector states that imply an occupying vehicle/cable
    /// (used by the `ReserveNow` rejection mapping in the reservation manager).
    pub fn is_occupied(&self) -> bool {
        matches!(
            self,
            Self::Preparing | Self::Charging | Self::SuspendedEV | Self::SuspendedEVSE | Self::Finishing
        )
    }
}

impl fmt::Display for ConnectorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for ConnectorStatus {
    fn from(s: &str) -> Self {
        match s {
            "Available" => Self::Available,
            "Preparing" => Self::Preparing,
            "Charging" => Self::Charging,
            "SuspendedEV" => Self::SuspendedEV,
            "SuspendedEVSE" => Self::SuspendedEVSE,
            "Finishing" => Self::Finishing,
            "Reserved" => Self::Reserved,
            "Faulted" => Self::Faulted,
            _ => Self::Unavailable,
        }
    }
}

/// Connection status of the charge point's WebSocket session, as seen by the CS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargePointStatus {
    Online,
    Offline,
    Unavailable,
    Unknown,
}

impl fmt::Display for ChargePointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Unavailable => "Unavailable",
            Self::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for ChargePointStatus {
    fn from(s: &str) -> Self {
        match s {
            "Online" => Self::Online,
            "Offline" => Self::Offline,
            "Unavailable" => Self::Unavailable,
            _ => Self::Unknown,
        }
    }
}

/// Security profile, as defined in OCPP §6 — transitions may only ascend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SecurityProfile {
    /// No authentication, plain WS. Bootstrap only.
    Unsecured = 0,
    /// HTTP Basic auth over plain WS.
    BasicAuth = 1,
    /// TLS with HTTP Basic auth.
    TlsBasicAuth = 2,
    /// Mutual TLS (client certificate).
    MutualTls = 3,
}

impl SecurityProfile {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Unsecured),
            1 => Some(Self::BasicAuth),
            2 => Some(Self::TlsBasicAuth),
            3 => Some(Self::MutualTls),
            _ => None,
        }
    }

    pub fn requires_basic_auth(&self) -> bool {
        matches!(self, Self::BasicAuth | Self::TlsBasicAuth)
    }

    pub fn requires_tls(&self) -> bool {
        matches!(self, Self::TlsBasicAuth | Self::MutualTls)
    }

    /// A transition is valid only if it does not lower the profile.
    pub fn can_transition_to(&self, next: SecurityProfile) -> bool {
        next >= *self
    }
}

/// One physical or logical connector on a charge point. Id 0 denotes the
/// charge point as a whole; ids 1..N are physical connectors.
///
/// Invariant: a connector holds at most one active transaction and at most
/// one active reservation; a reservation may coexist with a transaction only
/// until the transaction clears it on start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub id: u32,
    pub status: ConnectorStatus,
    /// Status most recently reported to the CS via StatusNotification — used
    /// to suppress duplicate notifications.
    pub last_notified_status: Option<ConnectorStatus>,
    pub error_code: Option<String>,
    pub info: Option<String>,
    pub vendor_id: Option<String>,
    pub vendor_error_code: Option<String>,

    /// Active transaction id, `None` when idle.
    pub transaction_id: Option<i32>,
    /// Locally-assigned sentinel id used while the CP is offline and the
    /// real server-assigned id is not yet known (see scenario E3).
    pub offline_transaction_id: Option<i32>,
    pub transaction_start_time: Option<DateTime<Utc>>,
    pub transaction_id_tag: Option<String>,
    pub transaction_parent_id_tag: Option<String>,

    pub reservation_id: Option<i32>,
    pub reservation_id_tag: Option<String>,
    pub reservation_parent_id_tag: Option<String>,
    pub reservation_expiry: Option<DateTime<Utc>>,
}

impl Connector {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            status: ConnectorStatus::Available,
            last_notified_status: None,
            error_code: None,
            info: None,
            vendor_id: None,
            vendor_error_code: None,
            transaction_id: None,
            offline_transaction_id: None,
            transaction_start_time: None,
            transaction_id_tag: None,
            transaction_parent_id_tag: None,
            reservation_id: None,
            reservation_id_tag: None,
            reservation_parent_id_tag: None,
            reservation_expiry: None,
        }
    }

    pub fn has_active_transaction(&self) -> bool {
        self.transaction_id.is_some() || self.offline_transaction_id.is_some()
    }

    pub fn has_active_reservation(&self) -> bool {
        self.reservation_id.is_some()
    }

    pub fn clear_transaction(&mut self) {
        self.transaction_id = None;
        self.offline_transaction_id = None;
        self.transaction_start_time = None;
        self.transaction_id_tag = None;
        self.transaction_parent_id_tag = None;
    }

    pub fn clear_reservation(&mut self) {
        self.reservation_id = None;
        self.reservation_id_tag = None;
        self.reservation_parent_id_tag = None;
        self.reservation_expiry = None;
    }

    /// Whether `id_tag` is allowed to start a transaction on this connector
    /// given its current reservation (if any).
    pub fn authorized_for_reservation(&self, id_tag: &str) -> bool {
        match (&self.reservation_id_tag, &self.reservation_parent_id_tag) {
            (Some(tag), _) if tag == id_tag => true,
            (_, Some(parent)) if parent == id_tag => true,
            (None, None) => true,
            _ => false,
        }
    }
}

/// A charge point registered on the Central System side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargePoint {
    pub id: String,
    pub ocpp_version: Option<crate::domain::OcppVersion>,
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub firmware_version: Option<String>,
    pub iccid: Option<String>,
    pub imsi: Option<String>,
    pub meter_type: Option<String>,
    pub meter_serial_number: Option<String>,
    pub security_profile: SecurityProfile,
    /// HTTP Basic / OCPP `AuthorizationKey` — hex-encoded, 16-40 hex chars.
    pub authorization_key: Option<String>,
    pub status: ChargePointStatus,
    pub connectors: Vec<Connector>,
    pub registered_at: DateTime<Utc>,
    pub last_heartbeat: Option<DateTime<Utc>>,
}

impl ChargePoint {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ocpp_version: None,
            vendor: None,
            model: None,
            serial_number: None,
            firmware_version: None,
            iccid: None,
            imsi: None,
            meter_type: None,
            meter_serial_number: None,
            security_profile: SecurityProfile::Unsecured,
            authorization_key: None,
            status: ChargePointStatus::Unknown,
            connectors: Vec::new(),
            registered_at: Utc::now(),
            last_heartbeat: None,
        }
    }

    pub fn set_online(&mut self) {
        self.status = ChargePointStatus::Online;
    }

    pub fn set_offline(&mut self) {
        self.status = ChargePointStatus::Offline;
    }

    pub fn update_heartbeat(&mut self) {
        self.last_heartbeat = Some(Utc::now());
    }

    pub fn get_connector(&self, id: u32) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id == id)
    }

    pub fn get_connector_mut(&mut self, id: u32) -> Option<&mut Connector> {
        self.connectors.iter_mut().find(|c| c.id == id)
    }

    pub fn add_connector(&mut self, id: u32) {
        if self.get_connector(id).is_none() {
            self.connectors.push(Connector::new(id));
        }
    }

    pub fn remove_connector(&mut self, id: u32) {
        self.connectors.retain(|c| c.id != id);
    }

    /// Ensure exactly `count` physical connectors (ids 1..=count) exist
    /// alongside the whole-station connector 0. Reducing the count resets
    /// every connector row rather than silently dropping a pending
    /// transaction on one of the discarded ids.
    pub fn ensure_connectors(&mut self, count: u32) {
        if self.get_connector(0).is_none() {
            self.connectors.push(Connector::new(0));
        }
        let current_physical = self.connectors.iter().filter(|c| c.id != 0).count() as u32;
        if current_physical != count {
            self.connectors.retain(|c| c.id == 0);
            for id in 1..=count {
                self.connectors.push(Connector::new(id));
            }
        }
    }

    pub fn update_connector_status(
        &mut self,
        id: u32,
        status: ConnectorStatus,
        error_code: Option<String>,
        info: Option<String>,
    ) {
        if let Some(connector) = self.get_connector_mut(id) {
            connector.status = status;
            connector.error_code = error_code;
            connector.info = info;
        } else {
            let mut connector = Connector::new(id);
            connector.status = status;
            connector.error_code = error_code;
            connector.info = info;
            self.connectors.push(connector);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_connectors_creates_whole_station_plus_physical() {
        let mut cp = ChargePoint::new("CP001");
        cp.ensure_connectors(2);
        assert_eq!(cp.connectors.len(), 3);
        assert!(cp.get_connector(0).is_some());
        assert!(cp.get_connector(1).is_some());
        assert!(cp.get_connector(2).is_some());
    }

    #[test]
    fn ensure_connectors_resets_on_count_change() {
        let mut cp = ChargePoint::new("CP001");
        cp.ensure_connectors(2);
        cp.get_connector_mut(1).unwrap().transaction_id = Some(7);
        cp.ensure_connectors(1);
        assert_eq!(cp.connectors.len(), 2);
        assert!(cp.get_connector(1).unwrap().transaction_id.is_none());
    }

    #[test]
    fn reservation_authorization_matches_id_tag_or_parent() {
        let mut c = Connector::new(1);
        c.reservation_id_tag = Some("X".into());
        c.reservation_parent_id_tag = Some("GROUP".into());
        assert!(c.authorized_for_reservation("X"));
        assert!(c.authorized_for_reservation("GROUP"));
        assert!(!c.authorized_for_reservation("Y"));
    }

    #[test]
    fn security_profile_transition_is_total_and_ascending_only() {
        assert!(SecurityProfile::Unsecured.can_transition_to(SecurityProfile::BasicAuth));
        assert!(!SecurityProfile::MutualTls.can_transition_to(SecurityProfile::Unsecured));
        assert!(SecurityProfile::TlsBasicAuth.can_transition_to(SecurityProfile::TlsBasicAuth));
    }
}
