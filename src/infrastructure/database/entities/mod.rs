//! Database entities module

pub mod charge_point;
pub mod charging_profile;
pub mod connector;
pub mod id_tag;
pub mod reservation;
pub mod transaction;

pub use charge_point::Entity as ChargePoint;
pub use charging_profile::Entity as ChargingProfile;
pub use connector::Entity as Connector;
pub use id_tag::Entity as IdTag;
pub use reservation::Entity as Reservation;
pub use transaction::Entity as Transaction;
