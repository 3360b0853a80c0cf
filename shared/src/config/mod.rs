//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing, token lifetimes, refresh cookie and cleanup settings
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `pagination` - Page size limits shared by every list endpoint
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod pagination;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, SessionConfig, TokenCleanupSettings};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use pagination::PaginationConfig;
pub use server::ServerConfig;

/// Error raised when the configuration cannot be assembled
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is absent
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    /// A variable is present but cannot be parsed
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Pagination limits
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::for_environment(env),
            pagination: PaginationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Outside development a `JWT_SECRET` must be supplied; the development
    /// fallback secret is never accepted in staging or production.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let auth = AuthConfig::from_env(environment)?;

        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env(),
            auth,
            pagination: PaginationConfig::default(),
            logging,
        })
    }
}

/// Reads an optional variable and parses it, reporting the key on failure
pub(crate) fn parse_env<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(None),
    }
}
