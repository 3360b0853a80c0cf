//! MySQL implementation of the RefreshTokenStore trait.
//!
//! Every state change is a single conditional `UPDATE`; the affected row
//! count decides success, so concurrent callers never both win.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use dt_core::domain::entities::{RefreshToken, TokenScope, UserId};
use dt_core::errors::StorageError;
use dt_core::pagination::Cursor;
use dt_core::repositories::RefreshTokenStore;

use crate::database::keyset::push_keyset_page;

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, token_hash, scope, is_revoked, expires_at, last_used_at, created_at FROM refresh_tokens";

/// MySQL implementation of RefreshTokenStore
#[derive(Clone)]
pub struct MySqlRefreshTokenStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshTokenStore {
    /// Create a new MySQL refresh token store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &MySqlRow) -> Result<RefreshToken, StorageError> {
        let id: String = row.try_get("id").map_err(corrupt)?;
        let user_id: String = row.try_get("user_id").map_err(corrupt)?;
        let scope: String = row.try_get("scope").map_err(corrupt)?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id).map_err(corrupt)?,
            user_id: user_id.parse::<UserId>().map_err(corrupt)?,
            token_hash: row.try_get("token_hash").map_err(corrupt)?,
            scope: scope.parse::<TokenScope>().map_err(corrupt)?,
            is_revoked: row.try_get("is_revoked").map_err(corrupt)?,
            expires_at: row.try_get::<DateTime<Utc>, _>("expires_at").map_err(corrupt)?,
            last_used_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_used_at")
                .map_err(corrupt)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(corrupt)?,
        })
    }
}

/// Map a driver error to the store's taxonomy
fn storage_error(err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::RowNotFound => StorageError::NotFound,
        sqlx::Error::Database(ref db) if db.is_unique_violation() => StorageError::AlreadyExists,
        other => StorageError::unavailable(other),
    }
}

fn corrupt(err: impl std::fmt::Display) -> StorageError {
    StorageError::unavailable(format!("corrupt refresh token row: {}", err))
}

fn affected_one(rows_affected: u64) -> Result<(), StorageError> {
    if rows_affected == 0 {
        Err(StorageError::NotFound)
    } else {
        Ok(())
    }
}

#[async_trait]
impl RefreshTokenStore for MySqlRefreshTokenStore {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, StorageError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, scope, is_revoked, expires_at, last_used_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.hyphenated().to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token_hash)
            .bind(token.scope.as_str())
            .bind(token.is_revoked)
            .bind(token.expires_at)
            .bind(token.last_used_at)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(token)
    }

    async fn find_valid_by_hash(
        &self,
        token_hash: &str,
        scope: TokenScope,
    ) -> Result<RefreshToken, StorageError> {
        let query = format!(
            "{} WHERE token_hash = ? AND scope = ? AND is_revoked = FALSE AND expires_at > ? LIMIT 1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(token_hash)
            .bind(scope.as_str())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or(StorageError::NotFound)?;

        Self::row_to_token(&row)
    }

    async fn revoke(&self, token_hash: &str, scope: TokenScope) -> Result<(), StorageError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token_hash = ?
                AND scope = ?
                AND is_revoked = FALSE
                AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .bind(scope.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        affected_one(result.rows_affected())
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), StorageError> {
        let query = r#"
            UPDATE refresh_tokens
            SET last_used_at = ?
            WHERE token_hash = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now().trunc_subsecs(6))
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        affected_one(result.rows_affected())
    }

    async fn revoke_all_for_owner(
        &self,
        owner: UserId,
        scope: TokenScope,
    ) -> Result<usize, StorageError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE user_id = ?
                AND scope = ?
                AND is_revoked = FALSE
                AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(owner.to_string())
            .bind(scope.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() as usize)
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        scope: TokenScope,
        after: Option<&Cursor>,
        fetch: usize,
    ) -> Result<Vec<RefreshToken>, StorageError> {
        let mut builder = QueryBuilder::<MySql>::new(SELECT_COLUMNS);
        builder
            .push(" WHERE user_id = ")
            .push_bind(owner.to_string())
            .push(" AND scope = ")
            .push_bind(scope.as_str());
        push_keyset_page(&mut builder, after, fetch);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn delete_inactive_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StorageError> {
        let query = r#"
            DELETE FROM refresh_tokens
            WHERE expires_at < ?
                AND (is_revoked = TRUE OR expires_at <= ?)
        "#;

        let result = sqlx::query(query)
            .bind(cutoff)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() as usize)
    }
}
