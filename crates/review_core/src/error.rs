//! Core error types for the review domain

use thiserror::Error;

/// Error type for review operations
#[derive(Debug, Error)]
pub enum ReviewError {
    /// A status string outside the closed value set was supplied or loaded
    #[error("Invalid review status: '{0}'")]
    InvalidStatus(String),

    /// A synthesized status method name matched no known variant
    #[error("No such method: '{0}'")]
    UnknownMethod(String),

    /// The requested review was not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A caller contract violation (e.g. an unresolvable owner reference)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A failure surfaced unchanged from the underlying store
    #[error("Store error: {0}")]
    Store(String),
}

impl ReviewError {
    pub fn invalid_status(value: impl Into<String>) -> Self {
        ReviewError::InvalidStatus(value.into())
    }

    pub fn unknown_method(method: impl Into<String>) -> Self {
        ReviewError::UnknownMethod(method.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ReviewError::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ReviewError::Validation(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        ReviewError::Store(message.into())
    }

    /// Checks whether this error indicates a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReviewError::NotFound(_))
    }

    /// Checks whether this error came from an unresolved dynamic method
    pub fn is_unknown_method(&self) -> bool {
        matches!(self, ReviewError::UnknownMethod(_))
    }
}
