//! Session token lifecycle: issuance, validation, rotation and revocation

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{
    hash_plaintext, IssuedRefreshToken, RefreshToken, Session, SessionSummary, TokenScope, UserId,
};
use crate::errors::{DomainError, StorageError, TokenError};
use crate::pagination::{Cursor, KeysetPaginator, Page, PageRequest};
use crate::repositories::RefreshTokenStore;

use super::access::AccessTokenCoder;
use super::config::TokenServiceConfig;

/// Bytes of entropy in a refresh token secret
const REFRESH_SECRET_BYTES: usize = 32;

/// Service for issuing and rotating access/refresh pairs
///
/// Holds no mutable state of its own. Every race between concurrent
/// rotations or revocations of the same token is settled by the store's
/// conditional revoke.
pub struct TokenService<S: RefreshTokenStore> {
    store: Arc<S>,
    coder: AccessTokenCoder,
    config: TokenServiceConfig,
}

impl<S: RefreshTokenStore> TokenService<S> {
    pub fn new(store: Arc<S>, config: TokenServiceConfig) -> Self {
        let coder = AccessTokenCoder::new(&config.secret);
        Self {
            store,
            coder,
            config,
        }
    }

    /// The access token coder, for request authentication outside the service
    pub fn coder(&self) -> &AccessTokenCoder {
        &self.coder
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issue a fresh access/refresh pair for `user_id`
    ///
    /// Only the hash of the refresh secret reaches the store; the plaintext
    /// is returned to the caller once.
    ///
    /// # Returns
    /// * `Ok(Session)` - The new pair
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing or entropy failed, an
    ///   expiry overflowed, or the store reported a hash collision
    /// * `Err(StorageError::Unavailable)` - The store could not persist the token
    pub async fn issue_session(&self, user_id: UserId) -> Result<Session, DomainError> {
        let access_token = self.coder.generate(user_id, self.config.access_token_ttl)?;

        let plaintext = generate_refresh_secret()?;
        let record = RefreshToken::new(
            user_id,
            hash_plaintext(&plaintext),
            TokenScope::Auth,
            self.config.refresh_token_ttl,
        )
        .ok_or_else(|| {
            error!(user_id = %user_id, "Refresh token expiry out of range");
            TokenError::TokenGenerationFailed
        })?;
        let token_id = record.id;

        let stored = self.store.create(record).await.map_err(|e| match e {
            StorageError::AlreadyExists => {
                error!(
                    user_id = %user_id,
                    token_id = %token_id,
                    "Refresh token hash collision"
                );
                DomainError::Token(TokenError::TokenGenerationFailed)
            }
            other => {
                error!(user_id = %user_id, error = %other, "Failed to persist refresh token");
                DomainError::Storage(other)
            }
        })?;

        debug!(user_id = %user_id, token_id = %stored.id, "Issued session");

        Ok(Session {
            user_id,
            access_token,
            access_expires_in: self.config.access_token_ttl.num_seconds(),
            refresh_token: IssuedRefreshToken::new(stored.id, plaintext, stored.expires_at),
        })
    }

    /// Authenticate a bearer token without touching storage
    pub fn validate_access(&self, token: &str) -> Result<UserId, DomainError> {
        Ok(self.coder.validate(token)?)
    }

    /// Exchange a refresh secret for a new pair, consuming the old one
    ///
    /// Unknown, revoked, expired and already-rotated secrets all fail with
    /// `SessionInvalid`. Of two concurrent rotations of the same secret at
    /// most one succeeds.
    pub async fn rotate(&self, old_plaintext: &str) -> Result<Session, DomainError> {
        let token_hash = hash_plaintext(old_plaintext);

        let current = self
            .store
            .find_valid_by_hash(&token_hash, TokenScope::Auth)
            .await
            .map_err(|e| self.session_failure(e, "lookup"))?;

        self.store
            .update_last_used(&token_hash)
            .await
            .map_err(|e| self.session_failure(e, "touch"))?;

        self.store
            .revoke(&token_hash, TokenScope::Auth)
            .await
            .map_err(|e| self.session_failure(e, "revoke"))?;

        let session = self.issue_session(current.user_id).await?;

        info!(
            user_id = %current.user_id,
            token_id = %current.id,
            new_token_id = %session.refresh_token.id,
            "Rotated refresh token"
        );

        Ok(session)
    }

    /// Revoke a refresh secret
    ///
    /// Succeeds whether or not the secret was still active, so callers cannot
    /// probe which secrets exist.
    pub async fn revoke(&self, plaintext: &str) -> Result<(), DomainError> {
        match self
            .store
            .revoke(&hash_plaintext(plaintext), TokenScope::Auth)
            .await
        {
            Ok(()) | Err(StorageError::NotFound) => Ok(()),
            Err(e) => {
                error!(error = %e, "Failed to revoke refresh token");
                Err(e.into())
            }
        }
    }

    /// Revoke every active refresh token of `user_id`
    pub async fn revoke_all(&self, user_id: UserId) -> Result<usize, DomainError> {
        let count = self
            .store
            .revoke_all_for_owner(user_id, TokenScope::Auth)
            .await?;

        info!(user_id = %user_id, revoked = count, "Revoked all sessions");
        Ok(count)
    }

    /// One page of the user's refresh tokens, oldest first, with derived status
    pub async fn list_sessions(
        &self,
        user_id: UserId,
        request: &PageRequest,
    ) -> Result<Page<SessionSummary>, DomainError> {
        let listing = OwnerSessions {
            store: self.store.as_ref(),
        };
        let page = listing.page(&user_id, request).await?;

        let now = Utc::now();
        Ok(page.map(|token| SessionSummary::from_token(&token, now)))
    }

    fn session_failure(&self, err: StorageError, step: &'static str) -> DomainError {
        match err {
            StorageError::NotFound => {
                warn!(step, "Refresh token rejected: session invalid");
                DomainError::Token(TokenError::SessionInvalid)
            }
            other => {
                error!(step, error = %other, "Refresh token store failure");
                DomainError::Storage(other)
            }
        }
    }
}

/// A user's refresh tokens seen as a pageable collection
struct OwnerSessions<'a, S> {
    store: &'a S,
}

#[async_trait]
impl<'a, S: RefreshTokenStore> KeysetPaginator for OwnerSessions<'a, S> {
    type Item = RefreshToken;
    type Scope = UserId;

    async fn fetch_after(
        &self,
        owner: &UserId,
        after: Option<&Cursor>,
        fetch: usize,
    ) -> Result<Vec<RefreshToken>, DomainError> {
        Ok(self
            .store
            .list_by_owner(*owner, TokenScope::Auth, after, fetch)
            .await?)
    }
}

/// 32 bytes from the OS CSPRNG, base64url without padding
fn generate_refresh_secret() -> Result<String, TokenError> {
    let mut bytes = [0u8; REFRESH_SECRET_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| TokenError::TokenGenerationFailed)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_secret_shape() {
        let secret = generate_refresh_secret().unwrap();

        // 32 bytes encode to 43 unpadded characters
        assert_eq!(secret.len(), 43);
        assert!(!secret.contains('='));
        assert_ne!(secret, generate_refresh_secret().unwrap());
    }
}
