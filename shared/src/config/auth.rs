//! Authentication configuration: token signing, lifetimes and the refresh cookie

use serde::{Deserialize, Serialize};

use super::{ConfigError, Environment};

/// Secret used only when running in development without `JWT_SECRET`
pub const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret for signing access tokens
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Algorithm for JWT signing (only HS256 is accepted)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using the development secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

/// Refresh cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the refresh token
    pub cookie_name: String,

    /// Cookie `Path` attribute
    pub cookie_path: String,

    /// Cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Cookie SameSite attribute
    pub same_site: String,

    /// Cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from("refresh_token"),
            cookie_path: String::from("/"),
            secure: false, // Set to true in production
            same_site: String::from("Lax"),
            http_only: default_http_only(),
        }
    }
}

impl SessionConfig {
    /// Cookie settings for the given environment
    pub fn for_environment(env: Environment) -> Self {
        Self {
            secure: env.is_production(),
            ..Default::default()
        }
    }
}

/// Settings for the optional purge of revoked and expired refresh tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenCleanupSettings {
    /// Whether the background purge runs at all
    pub enabled: bool,

    /// Seconds between purge cycles
    pub interval_seconds: u64,

    /// Days an inactive token is kept after its expiry before deletion
    pub retention_days: i64,
}

impl Default for TokenCleanupSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_seconds: 3600,
            retention_days: 30,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Refresh token purge configuration
    #[serde(default)]
    pub cleanup: TokenCleanupSettings,
}

impl AuthConfig {
    /// Defaults for an environment, using the development secret
    pub fn for_environment(env: Environment) -> Self {
        Self {
            jwt: JwtConfig::default(),
            session: SessionConfig::for_environment(env),
            cleanup: TokenCleanupSettings::default(),
        }
    }

    /// Create from environment variables
    pub fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Self::from_source(env, |key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup
    ///
    /// `JWT_SECRET` may only be omitted in development.
    pub fn from_source<F>(env: Environment, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if env.is_development() => DEVELOPMENT_SECRET.to_string(),
            None => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let mut config = Self::for_environment(env);
        config.jwt.secret = secret;

        if let Some(value) = lookup("JWT_ACCESS_TOKEN_EXPIRY") {
            config.jwt.access_token_expiry = parse_value("JWT_ACCESS_TOKEN_EXPIRY", value)?;
        }
        if let Some(value) = lookup("JWT_REFRESH_TOKEN_EXPIRY") {
            config.jwt.refresh_token_expiry = parse_value("JWT_REFRESH_TOKEN_EXPIRY", value)?;
        }
        if let Some(value) = lookup("TOKEN_CLEANUP_ENABLED") {
            config.cleanup.enabled = parse_value("TOKEN_CLEANUP_ENABLED", value)?;
        }
        if let Some(value) = lookup("TOKEN_CLEANUP_RETENTION_DAYS") {
            config.cleanup.retention_days = parse_value("TOKEN_CLEANUP_RETENTION_DAYS", value)?;
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_http_only() -> bool {
    true
}
