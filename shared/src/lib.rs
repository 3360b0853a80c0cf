//! Shared configuration and common types for the Device Telemetry API server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types (auth, database, server, pagination, logging)
//! - Error response structures
//! - Pagination request/response types for list endpoints

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    PaginationConfig, ServerConfig, SessionConfig, TokenCleanupSettings,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{CursorPage, PageQuery};
