//! Mapping of domain errors onto HTTP responses
//!
//! Every authentication-kind failure collapses to one 401 so that clients
//! react uniformly by re-authenticating.

use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use dt_core::errors::{DomainError, PaginationError, StorageError, TokenError};
use dt_shared::{error_codes, ErrorResponse};

/// Error returned by handlers and middleware
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    AuthenticationRequired(&'static str),

    #[error("{0}")]
    BadRequest(String),
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl From<PaginationError> for ApiError {
    fn from(err: PaginationError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::AuthenticationRequired(_) => error_codes::AUTHENTICATION_REQUIRED,
            ApiError::BadRequest(_) => error_codes::BAD_REQUEST,
            ApiError::Domain(err) if err.requires_reauthentication() => {
                error_codes::AUTHENTICATION_REQUIRED
            }
            ApiError::Domain(DomainError::Pagination(_)) => error_codes::INVALID_CURSOR,
            ApiError::Domain(DomainError::Validation { .. }) => error_codes::BAD_REQUEST,
            ApiError::Domain(DomainError::Storage(StorageError::NotFound)) => error_codes::NOT_FOUND,
            ApiError::Domain(DomainError::Storage(StorageError::Unavailable { .. })) => {
                error_codes::SERVICE_UNAVAILABLE
            }
            ApiError::Domain(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Message safe to show to clients
    fn public_message(&self) -> String {
        match self.status_code() {
            StatusCode::SERVICE_UNAVAILABLE => "Service temporarily unavailable".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::AuthenticationRequired(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) if err.requires_reauthentication() => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::Pagination(_))
            | ApiError::Domain(DomainError::Validation { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::Storage(StorageError::NotFound)) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Storage(StorageError::Unavailable { .. })) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut builder = HttpResponse::build(status);
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(ErrorResponse::new(self.code(), self.public_message()))
    }
}
