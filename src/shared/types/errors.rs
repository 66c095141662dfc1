use thiserror::Error;

use crate::shared::cancellation::Cancelled;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Operation was cancelled")]
    Cancelled,
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }
}

impl From<Cancelled> for DomainError {
    fn from(_: Cancelled) -> Self {
        DomainError::Cancelled
    }
}

/// Result type for repository and collaborator calls
pub type DomainResult<T> = Result<T, DomainError>;
