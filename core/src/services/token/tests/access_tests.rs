//! Unit tests for the access token coder

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::domain::entities::UserId;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{AccessTokenCoder, SigningSecret};

const SECRET: &str = "test-secret-for-access-tokens";

fn coder() -> AccessTokenCoder {
    AccessTokenCoder::new(&SigningSecret::new(SECRET).unwrap())
}

fn sign_raw(claims: serde_json::Value, algorithm: Algorithm, secret: &str) -> String {
    encode(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Correctly signed compact token around an arbitrary `header.payload`
fn signed_raw(message: &str) -> String {
    let signature = jsonwebtoken::crypto::sign(
        message.as_bytes(),
        &EncodingKey::from_secret(SECRET.as_bytes()),
        Algorithm::HS256,
    )
    .unwrap();
    format!("{}.{}", message, signature)
}

#[test]
fn test_generate_then_validate_returns_subject() {
    let coder = coder();
    let user_id = UserId::new();

    for ttl in [Duration::seconds(5), Duration::minutes(15), Duration::days(1)] {
        let token = coder.generate(user_id, ttl).unwrap();
        assert_eq!(coder.validate(&token).unwrap(), user_id);
    }
}

#[test]
fn test_non_positive_ttl_is_expired_immediately() {
    let coder = coder();
    let user_id = UserId::new();

    for ttl in [Duration::zero(), Duration::seconds(-1), Duration::days(-3)] {
        let token = coder.generate(user_id, ttl).unwrap();
        assert_eq!(coder.validate(&token).unwrap_err(), TokenError::Expired);
    }
}

#[test]
fn test_expiry_has_no_leeway() {
    let coder = coder();
    let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let token = coder
        .generate_at(UserId::new(), issued_at, Duration::seconds(60))
        .unwrap();

    assert!(coder
        .validate_at(&token, issued_at + Duration::seconds(59))
        .is_ok());
    assert_eq!(
        coder
            .validate_at(&token, issued_at + Duration::seconds(60))
            .unwrap_err(),
        TokenError::Expired
    );
}

#[test]
fn test_sub_second_ttl_is_valid_when_issued() {
    let coder = coder();
    let user_id = UserId::new();
    let issued_at = DateTime::from_timestamp(1_700_000_000, 500_000_000).unwrap();

    let token = coder
        .generate_at(user_id, issued_at, Duration::milliseconds(100))
        .unwrap();
    assert_eq!(coder.validate_at(&token, issued_at).unwrap(), user_id);

    // Rounded up to the next whole second, never further
    let next_second = DateTime::from_timestamp(1_700_000_001, 0).unwrap();
    assert_eq!(
        coder.validate_at(&token, next_second).unwrap_err(),
        TokenError::Expired
    );

    let negative = coder
        .generate_at(user_id, issued_at, Duration::milliseconds(-100))
        .unwrap();
    assert_eq!(
        coder.validate_at(&negative, issued_at).unwrap_err(),
        TokenError::Expired
    );
}

#[test]
fn test_out_of_range_ttl_fails_generation() {
    let coder = coder();

    for ttl in [Duration::MAX, Duration::MIN] {
        assert_eq!(
            coder.generate(UserId::new(), ttl).unwrap_err(),
            TokenError::TokenGenerationFailed
        );
    }
}

#[test]
fn test_foreign_secret_is_rejected() {
    let other = AccessTokenCoder::new(&SigningSecret::new("some-other-secret").unwrap());
    let token = other.generate(UserId::new(), Duration::minutes(5)).unwrap();

    assert_eq!(coder().validate(&token).unwrap_err(), TokenError::BadSignature);
}

#[test]
fn test_foreign_secret_wins_over_expiry() {
    let other = AccessTokenCoder::new(&SigningSecret::new("some-other-secret").unwrap());
    let token = other.generate(UserId::new(), Duration::seconds(-10)).unwrap();

    assert_eq!(coder().validate(&token).unwrap_err(), TokenError::BadSignature);
}

#[test]
fn test_other_algorithms_are_rejected() {
    let claims = json!({
        "sub": UserId::new().to_string(),
        "iat": Utc::now().timestamp(),
        "exp": (Utc::now() + Duration::minutes(5)).timestamp(),
    });

    for algorithm in [Algorithm::HS384, Algorithm::HS512] {
        let token = sign_raw(claims.clone(), algorithm, SECRET);
        assert_eq!(coder().validate(&token).unwrap_err(), TokenError::WrongAlgorithm);
    }
}

#[test]
fn test_unsigned_token_is_rejected() {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({
            "sub": UserId::new().to_string(),
            "iat": Utc::now().timestamp(),
            "exp": (Utc::now() + Duration::minutes(5)).timestamp(),
        })
        .to_string(),
    );

    let token = format!("{}.{}.", header, payload);
    assert_eq!(coder().validate(&token).unwrap_err(), TokenError::WrongAlgorithm);
}

#[test]
fn test_malformed_tokens() {
    let coder = coder();
    let valid = coder.generate(UserId::new(), Duration::minutes(5)).unwrap();
    let mut parts = valid.split('.');
    let header = parts.next().unwrap();

    let samples = vec![
        String::new(),
        "not-a-jwt".to_string(),
        "a.b".to_string(),
        format!("{}.extra", valid),
        signed_raw(&format!("{}.{}", header, URL_SAFE_NO_PAD.encode("not json"))),
        "%%%.e30.sig".to_string(),
    ];

    for token in samples {
        assert_eq!(
            coder.validate(&token).unwrap_err(),
            TokenError::Malformed,
            "token {:?}",
            token
        );
    }
}

#[test]
fn test_subject_must_be_a_user_id() {
    let token = sign_raw(
        json!({
            "sub": "not-a-uuid",
            "iat": Utc::now().timestamp(),
            "exp": (Utc::now() + Duration::minutes(5)).timestamp(),
        }),
        Algorithm::HS256,
        SECRET,
    );

    assert_eq!(coder().validate(&token).unwrap_err(), TokenError::Malformed);
}

#[test]
fn test_missing_expiry_is_malformed() {
    let token = sign_raw(
        json!({ "sub": UserId::new().to_string(), "iat": Utc::now().timestamp() }),
        Algorithm::HS256,
        SECRET,
    );

    assert_eq!(coder().validate(&token).unwrap_err(), TokenError::Malformed);
}

#[test]
fn test_empty_secret_is_rejected() {
    let result = SigningSecret::new("");
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[test]
fn test_secret_is_redacted_in_debug() {
    let secret = SigningSecret::new(SECRET).unwrap();

    assert!(!format!("{:?}", secret).contains(SECRET));
    assert!(!format!("{:?}", coder()).contains(SECRET));
}
