//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - Keyset pagination SQL helpers
//! - The MySQL refresh token store
//! - The embedded schema migration

pub mod connection;
pub mod keyset;
pub mod mysql;

#[cfg(test)]
mod tests;

use sqlx::migrate::Migrator;

/// Migrations embedded from `infra/migrations`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use keyset::push_keyset_page;
pub use mysql::MySqlRefreshTokenStore;
