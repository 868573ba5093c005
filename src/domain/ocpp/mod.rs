//! OCPP protocol-version value objects.

pub mod version;

pub use version::OcppVersion;
