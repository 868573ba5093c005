//! Domain and infrastructure error types.

use thiserror::Error;

/// Errors raised by domain services and repositories.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("validation: {0}")]
    Validation(String),

    #[error("already exists: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("charge point {0} is not connected")]
    ChargePointOffline(String),

    #[error("command timed out for {0}")]
    CommandTimeout(String),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

/// Errors from the persistence facade and other external adapters.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type used throughout the domain and application layers.
pub type DomainResult<T> = Result<T, DomainError>;
