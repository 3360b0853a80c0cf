//! Token entities for session authentication.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::pagination::{Cursor, Keyed};

use super::user::UserId;

/// Purpose a refresh token was minted for
///
/// Lookups are partitioned by scope, so tokens minted for one purpose never
/// validate for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    /// Login session refresh
    Auth,
}

impl TokenScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScope::Auth => "auth",
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auth" => Ok(TokenScope::Auth),
            other => Err(format!("Unknown token scope: {}", other)),
        }
    }
}

/// Status of a refresh token, derived at read time from its stored fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshTokenStatus {
    /// Not revoked and not yet expired
    Active,
    /// Explicitly revoked (takes precedence over expiry)
    Revoked,
    /// Not revoked but past its expiry
    Expired,
}

/// Claims carried by a signed access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Claims for `subject` valid for `ttl` from `now`
    ///
    /// A non-positive `ttl` produces claims that are already expired. A
    /// positive one that ends mid-second is rounded up to the next whole
    /// second, so the token is never born expired. `None` when the expiry
    /// falls outside the representable range.
    pub fn new(subject: UserId, now: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        let expires_at = now.checked_add_signed(ttl)?;
        let mut exp = expires_at.timestamp();
        if ttl > Duration::zero() && expires_at.timestamp_subsec_nanos() > 0 {
            exp += 1;
        }

        Some(Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp,
        })
    }

    /// Expired when the current second has reached `exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<UserId, uuid::Error> {
        self.sub.parse()
    }
}

/// Refresh token record as persisted by a store
///
/// Only the SHA-256 hash of the secret is ever held here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: UserId,

    /// Hex encoded SHA-256 of the plaintext secret
    pub token_hash: String,

    /// Purpose of the token
    pub scope: TokenScope,

    /// Whether the token has been revoked
    pub is_revoked: bool,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp of the last successful use, if any
    pub last_used_at: Option<DateTime<Utc>>,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new, active refresh token record
    ///
    /// Timestamps are truncated to microseconds so that a record read back
    /// from the database keeps the same pagination key. `None` when `ttl`
    /// pushes the expiry out of range.
    pub fn new(
        user_id: UserId,
        token_hash: String,
        scope: TokenScope,
        ttl: Duration,
    ) -> Option<Self> {
        let now = Utc::now().trunc_subsecs(6);
        let expires_at = now.checked_add_signed(ttl)?;

        Some(Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            scope,
            is_revoked: false,
            expires_at,
            last_used_at: None,
            created_at: now,
        })
    }

    /// Derived status at `now`
    pub fn status_at(&self, now: DateTime<Utc>) -> RefreshTokenStatus {
        if self.is_revoked {
            RefreshTokenStatus::Revoked
        } else if now >= self.expires_at {
            RefreshTokenStatus::Expired
        } else {
            RefreshTokenStatus::Active
        }
    }

    /// Derived status at the current time
    pub fn status(&self) -> RefreshTokenStatus {
        self.status_at(Utc::now())
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == RefreshTokenStatus::Active
    }
}

impl Keyed for RefreshToken {
    fn keyset_cursor(&self) -> Cursor {
        Cursor::new(self.id, self.created_at)
    }
}

/// Refresh token handed to the caller exactly once
///
/// The plaintext is never persisted and is redacted from `Debug` output.
#[derive(Clone)]
pub struct IssuedRefreshToken {
    /// Identifier of the stored record
    pub id: Uuid,

    plaintext: String,

    /// Absolute expiry, used for the cookie `Expires` attribute
    pub expires_at: DateTime<Utc>,
}

impl IssuedRefreshToken {
    pub(crate) fn new(id: Uuid, plaintext: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            plaintext,
            expires_at,
        }
    }

    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    pub fn into_plaintext(self) -> String {
        self.plaintext
    }
}

impl fmt::Debug for IssuedRefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedRefreshToken")
            .field("id", &self.id)
            .field("plaintext", &"[redacted]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Access/refresh pair produced by issuance and rotation
#[derive(Debug, Clone)]
pub struct Session {
    /// Owner of the session
    pub user_id: UserId,

    /// Signed access token
    pub access_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// One-time refresh token
    pub refresh_token: IssuedRefreshToken,
}

/// Public view of a stored refresh token, used by session listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub status: RefreshTokenStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl SessionSummary {
    pub fn from_token(token: &RefreshToken, now: DateTime<Utc>) -> Self {
        Self {
            id: token.id,
            status: token.status_at(now),
            created_at: token.created_at,
            expires_at: token.expires_at,
            last_used_at: token.last_used_at,
        }
    }
}

/// One-way hash of a refresh token secret (hex encoded SHA-256)
pub fn hash_plaintext(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}
