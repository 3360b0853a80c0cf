//! In-memory refresh token store
//!
//! Used by tests and local runs without a database. The write lock stands in
//! for the row-level atomicity a database gives a conditional `UPDATE`.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{RefreshToken, TokenScope, UserId};
use crate::errors::StorageError;
use crate::pagination::{select_after, Cursor};

use super::store::RefreshTokenStore;

/// Refresh tokens keyed by hash
#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenStore {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, whatever their status
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    /// Raw row lookup, ignoring scope and status
    pub async fn get(&self, token_hash: &str) -> Option<RefreshToken> {
        self.tokens.read().await.get(token_hash).cloned()
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, StorageError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token_hash) {
            return Err(StorageError::AlreadyExists);
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_valid_by_hash(
        &self,
        token_hash: &str,
        scope: TokenScope,
    ) -> Result<RefreshToken, StorageError> {
        let now = Utc::now();
        let tokens = self.tokens.read().await;

        tokens
            .get(token_hash)
            .filter(|t| t.scope == scope && t.is_active_at(now))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn revoke(&self, token_hash: &str, scope: TokenScope) -> Result<(), StorageError> {
        let now = Utc::now();
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token_hash) {
            Some(token) if token.scope == scope && token.is_active_at(now) => {
                token.is_revoked = true;
                Ok(())
            }
            _ => Err(StorageError::NotFound),
        }
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), StorageError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token_hash) {
            Some(token) if !token.is_revoked => {
                token.last_used_at = Some(Utc::now().trunc_subsecs(6));
                Ok(())
            }
            _ => Err(StorageError::NotFound),
        }
    }

    async fn revoke_all_for_owner(
        &self,
        owner: UserId,
        scope: TokenScope,
    ) -> Result<usize, StorageError> {
        let now = Utc::now();
        let mut tokens = self.tokens.write().await;

        let mut count = 0;
        for token in tokens.values_mut() {
            if token.user_id == owner && token.scope == scope && token.is_active_at(now) {
                token.is_revoked = true;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        scope: TokenScope,
        after: Option<&Cursor>,
        fetch: usize,
    ) -> Result<Vec<RefreshToken>, StorageError> {
        let tokens = self.tokens.read().await;

        let owned: Vec<RefreshToken> = tokens
            .values()
            .filter(|t| t.user_id == owner && t.scope == scope)
            .cloned()
            .collect();
        Ok(select_after(&owned, after, fetch))
    }

    async fn delete_inactive_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StorageError> {
        let now = Utc::now();
        let mut tokens = self.tokens.write().await;

        let before = tokens.len();
        tokens.retain(|_, t| t.is_active_at(now) || t.expires_at >= cutoff);
        Ok(before - tokens.len())
    }
}
