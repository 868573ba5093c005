//! Transaction aggregate: entity, value objects, and repository port.

pub mod model;
pub mod repository;

pub use model::{ChargingLimitType, Transaction, TransactionStatus};
pub use repository::TransactionRepository;
