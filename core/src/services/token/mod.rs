//! Token service module
//!
//! This module handles all token-related operations including:
//! - Access token signing and verification (HS256)
//! - Refresh token issuance, rotation and revocation
//! - Session listing
//! - Opt-in background purge of dead refresh tokens

mod access;
mod cleanup;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use access::{AccessTokenCoder, SigningSecret, ACCESS_TOKEN_ALGORITHM};
pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use service::TokenService;
