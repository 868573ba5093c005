//! Domain layer - core business entities and types

pub mod charge_point;
pub mod charging_profile;
pub mod error;
pub mod events;
pub mod id_tag;
pub mod ocpp;
pub mod repositories;
pub mod reservation;
pub mod transaction;

pub use charge_point::{ChargePoint, ChargePointStatus, Connector, ConnectorStatus, SecurityProfile};
pub use charging_profile::ChargingProfile;
pub use error::{DomainError, DomainResult};
pub use id_tag::IdTag;
pub use ocpp::OcppVersion;
pub use repositories::RepositoryProvider;
pub use reservation::Reservation;
pub use transaction::{ChargingLimitType, Transaction, TransactionStatus};
