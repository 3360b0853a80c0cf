//! Error taxonomy for the token lifecycle, the refresh token store and pagination

use thiserror::Error;

/// Access and refresh token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token signed with an unexpected algorithm")]
    WrongAlgorithm,

    #[error("Token expired")]
    Expired,

    #[error("Token signature verification failed")]
    BadSignature,

    #[error("Session is no longer valid, please login again")]
    SessionInvalid,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Errors that oblige the caller to authenticate again
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, TokenError::TokenGenerationFailed)
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Malformed => "TOKEN_MALFORMED",
            TokenError::WrongAlgorithm => "TOKEN_WRONG_ALGORITHM",
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::BadSignature => "TOKEN_BAD_SIGNATURE",
            TokenError::SessionInvalid => "SESSION_INVALID",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// Conditions reported by a refresh token store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No row matched (absent, or not in the state the write required)
    #[error("Record not found")]
    NotFound,

    /// A row with the same token hash already exists
    #[error("Record already exists")]
    AlreadyExists,

    /// The backing store could not be reached or failed
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}

impl StorageError {
    /// Wrap any backend failure as an opaque unavailability
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        StorageError::Unavailable {
            message: err.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::NotFound => "NOT_FOUND",
            StorageError::AlreadyExists => "ALREADY_EXISTS",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

/// Pagination errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid cursor: {reason}")]
    InvalidCursor { reason: &'static str },
}

impl PaginationError {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        PaginationError::InvalidCursor { reason }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PaginationError::InvalidCursor { .. } => "INVALID_CURSOR",
        }
    }
}
