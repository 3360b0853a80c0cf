//! Tests for token entities

use chrono::{Duration, Utc};

use crate::domain::entities::token::{
    hash_plaintext, AccessTokenClaims, IssuedRefreshToken, RefreshToken, RefreshTokenStatus,
    SessionSummary, TokenScope,
};
use crate::domain::entities::user::UserId;
use crate::pagination::Keyed;

fn sample_token() -> RefreshToken {
    RefreshToken::new(
        UserId::new(),
        hash_plaintext("secret"),
        TokenScope::Auth,
        Duration::days(7),
    )
    .unwrap()
}

#[test]
fn test_new_refresh_token_is_active() {
    let token = sample_token();

    assert!(!token.is_revoked);
    assert!(token.last_used_at.is_none());
    assert_eq!(token.status(), RefreshTokenStatus::Active);
    assert_eq!(token.expires_at - token.created_at, Duration::days(7));
}

#[test]
fn test_status_is_expired_at_expiry_instant() {
    let token = sample_token();

    assert_eq!(token.status_at(token.expires_at - Duration::seconds(1)), RefreshTokenStatus::Active);
    assert_eq!(token.status_at(token.expires_at), RefreshTokenStatus::Expired);
}

#[test]
fn test_revoked_takes_precedence_over_expired() {
    let mut token = sample_token();
    token.is_revoked = true;

    let later = token.expires_at + Duration::days(1);
    assert_eq!(token.status_at(later), RefreshTokenStatus::Revoked);
    assert!(!token.is_active_at(Utc::now()));
}

#[test]
fn test_created_at_has_microsecond_precision() {
    let token = sample_token();
    assert_eq!(token.created_at.timestamp_subsec_nanos() % 1_000, 0);
}

#[test]
fn test_keyset_cursor_uses_id_and_created_at() {
    let token = sample_token();
    let cursor = token.keyset_cursor();

    assert_eq!(cursor.id, token.id);
    assert_eq!(cursor.created_at, token.created_at);
}

#[test]
fn test_hash_is_hex_sha256() {
    let hash = hash_plaintext("abc");

    assert_eq!(
        hash,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_ne!(hash_plaintext("abd"), hash);
}

#[test]
fn test_scope_round_trip() {
    assert_eq!(TokenScope::Auth.as_str(), "auth");
    assert_eq!("auth".parse::<TokenScope>().unwrap(), TokenScope::Auth);
    assert!("password-reset".parse::<TokenScope>().is_err());
}

#[test]
fn test_access_claims_expiry() {
    let now = Utc::now();
    let user_id = UserId::new();

    let claims = AccessTokenClaims::new(user_id, now, Duration::minutes(15)).unwrap();
    assert!(!claims.is_expired_at(now));
    assert_eq!(claims.user_id().unwrap(), user_id);

    let expired = AccessTokenClaims::new(user_id, now, Duration::zero()).unwrap();
    assert!(expired.is_expired_at(now));
}

#[test]
fn test_issued_token_debug_redacts_plaintext() {
    let issued = IssuedRefreshToken::new(uuid::Uuid::new_v4(), "top-secret".to_string(), Utc::now());
    let debug = format!("{:?}", issued);

    assert!(!debug.contains("top-secret"));
    assert!(debug.contains("[redacted]"));
    assert_eq!(issued.plaintext(), "top-secret");
}

#[test]
fn test_session_summary_reports_derived_status() {
    let mut token = sample_token();
    token.is_revoked = true;

    let summary = SessionSummary::from_token(&token, Utc::now());
    assert_eq!(summary.id, token.id);
    assert_eq!(summary.status, RefreshTokenStatus::Revoked);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["status"], "revoked");
}
