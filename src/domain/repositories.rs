//! Aggregator port over the per-aggregate repository traits.
//!
//! Infrastructure provides exactly one implementation per process (backed by
//! a single SeaORM connection pool); the application layer depends only on
//! this trait, never on a concrete database crate.

use crate::domain::charge_point::ChargePointRepository;
use crate::domain::charging_profile::ChargingProfileRepository;
use crate::domain::id_tag::IdTagRepository;
use crate::domain::reservation::ReservationRepository;
use crate::domain::transaction::TransactionRepository;

pub trait RepositoryProvider: Send + Sync {
    fn charge_points(&self) -> &dyn ChargePointRepository;
    fn transactions(&self) -> &dyn TransactionRepository;
    fn id_tags(&self) -> &dyn IdTagRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn charging_profiles(&self) -> &dyn ChargingProfileRepository;
}
