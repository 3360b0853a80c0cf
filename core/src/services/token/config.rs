//! Configuration for the token service

use chrono::{Duration, Utc};
use dt_shared::JwtConfig;

use crate::errors::DomainError;

use super::access::SigningSecret;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token signing secret
    pub secret: SigningSecret,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl TokenServiceConfig {
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret,
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::days(7),
        }
    }

    /// Build from the application's JWT settings
    ///
    /// Only `HS256` is supported; any other configured algorithm is an error.
    pub fn from_jwt_config(config: &JwtConfig) -> Result<Self, DomainError> {
        if !config.algorithm.eq_ignore_ascii_case("HS256") {
            return Err(DomainError::Validation {
                message: format!("unsupported JWT algorithm: {}", config.algorithm),
            });
        }

        Ok(Self {
            secret: SigningSecret::new(config.secret.as_bytes())?,
            access_token_ttl: ttl_from_seconds("access_token_expiry", config.access_token_expiry)?,
            refresh_token_ttl: ttl_from_seconds(
                "refresh_token_expiry",
                config.refresh_token_expiry,
            )?,
        })
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }
}

/// A lifetime in seconds that can be added to the current time
fn ttl_from_seconds(field: &str, seconds: i64) -> Result<Duration, DomainError> {
    Duration::try_seconds(seconds)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| DomainError::Validation {
            message: format!("{} out of range: {} seconds", field, seconds),
        })
}
