//! Charging profile aggregate
//!
//! Contains the ChargingProfile entity, related types, and repository interface.

pub mod model;
pub mod repository;

pub use model::ChargingProfile;
pub use repository::ChargingProfileRepository;
