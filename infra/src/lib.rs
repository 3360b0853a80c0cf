//! # Infrastructure Layer
//!
//! Concrete implementations behind the core's contracts:
//! - **Database**: MySQL refresh token store, keyset SQL helpers and the
//!   embedded schema migration, all on SQLx
//! - **Logging**: `tracing-subscriber` setup driven by [`LoggingConfig`]
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

pub use dt_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Logging module - subscriber initialisation
pub mod logging;

pub use dt_shared::config::LoggingConfig;
pub use logging::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
