//! Tests for the domain error taxonomy

use crate::errors::{DomainError, PaginationError, StorageError, TokenError};

#[test]
fn test_token_errors_require_reauthentication() {
    for err in [
        TokenError::Malformed,
        TokenError::WrongAlgorithm,
        TokenError::Expired,
        TokenError::BadSignature,
        TokenError::SessionInvalid,
    ] {
        assert!(DomainError::from(err).requires_reauthentication());
    }
}

#[test]
fn test_generation_failure_is_not_an_authentication_failure() {
    let err = DomainError::from(TokenError::TokenGenerationFailed);
    assert!(!err.requires_reauthentication());
    assert_eq!(err.error_code(), "TOKEN_GENERATION_FAILED");
}

#[test]
fn test_storage_unavailable_is_opaque_infrastructure_failure() {
    let err = DomainError::from(StorageError::unavailable("connection refused"));

    assert!(!err.requires_reauthentication());
    assert_eq!(err.error_code(), "STORAGE_UNAVAILABLE");
    assert_eq!(err.to_string(), "Storage unavailable: connection refused");
}

#[test]
fn test_invalid_cursor_is_input_error() {
    let err = DomainError::from(PaginationError::InvalidCursor { reason: "bad encoding" });

    assert!(!err.requires_reauthentication());
    assert_eq!(err.error_code(), "INVALID_CURSOR");
    assert!(err.to_string().contains("bad encoding"));
}

#[test]
fn test_transparent_display() {
    let err = DomainError::from(TokenError::SessionInvalid);
    assert_eq!(err.to_string(), TokenError::SessionInvalid.to_string());
}
