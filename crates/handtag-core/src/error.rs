//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A candidate event or command failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The referenced match does not exist.
    #[error("match not found: {0}")]
    MatchNotFound(Uuid),

    /// The referenced event does not exist.
    #[error("event not found: {0}")]
    EventNotFound(Uuid),

    /// The persistence layer failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Returns `true` for the not-found family of errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MatchNotFound(_) | Self::EventNotFound(_))
    }
}
