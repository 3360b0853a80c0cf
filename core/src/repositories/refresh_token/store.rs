//! Refresh token store contract

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{RefreshToken, TokenScope, UserId};
use crate::errors::StorageError;
use crate::pagination::Cursor;

/// Persistence for hashed refresh tokens
///
/// Every lookup is partitioned by [`TokenScope`]. State-changing writes are
/// conditional on the row still being active, so two concurrent callers
/// racing on the same token observe exactly one success.
///
/// Implementations report backend failures as [`StorageError::Unavailable`]
/// and never retry on their own.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Persist a new token
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The stored record
    /// * `Err(StorageError::AlreadyExists)` - A token with the same hash exists
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, StorageError>;

    /// Find an active token by hash within a scope
    ///
    /// Revoked and expired rows are reported as `NotFound`, exactly like
    /// unknown hashes.
    async fn find_valid_by_hash(
        &self,
        token_hash: &str,
        scope: TokenScope,
    ) -> Result<RefreshToken, StorageError>;

    /// Revoke a token if and only if it is currently active
    ///
    /// # Returns
    /// * `Ok(())` - This call performed the revocation
    /// * `Err(StorageError::NotFound)` - Unknown, already revoked or expired
    async fn revoke(&self, token_hash: &str, scope: TokenScope) -> Result<(), StorageError>;

    /// Stamp the last successful use of a token that has not been revoked
    async fn update_last_used(&self, token_hash: &str) -> Result<(), StorageError>;

    /// Revoke every active token of `owner` in `scope`, returning how many changed
    async fn revoke_all_for_owner(
        &self,
        owner: UserId,
        scope: TokenScope,
    ) -> Result<usize, StorageError>;

    /// Up to `fetch` tokens of `owner` in `scope` strictly after `after`,
    /// ordered by `(created_at, id)`, whatever their status
    async fn list_by_owner(
        &self,
        owner: UserId,
        scope: TokenScope,
        after: Option<&Cursor>,
        fetch: usize,
    ) -> Result<Vec<RefreshToken>, StorageError>;

    /// Delete revoked or expired tokens whose expiry is older than `cutoff`
    async fn delete_inactive_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StorageError>;
}
