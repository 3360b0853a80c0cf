//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{PaginationError, StorageError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

impl DomainError {
    /// Whether the caller has to re-authenticate from scratch
    ///
    /// Authentication failures are never retried transparently.
    pub fn requires_reauthentication(&self) -> bool {
        match self {
            DomainError::Token(err) => err.is_authentication_failure(),
            _ => false,
        }
    }

    /// Stable machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Token(err) => err.error_code(),
            DomainError::Storage(err) => err.error_code(),
            DomainError::Pagination(err) => err.error_code(),
        }
    }
}
