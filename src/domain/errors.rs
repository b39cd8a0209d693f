//! Domain errors for the tryst engine.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors that can occur in the tryst system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Partner not found: {0}")]
    PartnerNotFound(Uuid),

    #[error("Encounter not found: {0}")]
    EncounterNotFound(Uuid),

    #[error("Duplicate alias: {0}")]
    DuplicateAlias(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
