//! Periodic purge of refresh tokens that can no longer be used
//!
//! Disabled unless an operator opts in: revoked and expired rows are the
//! audit trail of past sessions.

use chrono::{DateTime, Duration, Utc};
use dt_shared::TokenCleanupSettings;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::RefreshTokenStore;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// Whether to enable automatic cleanup
    pub enabled: bool,
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Days an inactive token is kept after its expiry
    pub retention_days: i64,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_seconds: 3600,
            retention_days: 30,
        }
    }
}

impl From<&TokenCleanupSettings> for TokenCleanupConfig {
    fn from(settings: &TokenCleanupSettings) -> Self {
        Self {
            enabled: settings.enabled,
            interval_seconds: settings.interval_seconds,
            retention_days: settings.retention_days,
        }
    }
}

/// Service deleting revoked and expired refresh tokens past retention
pub struct TokenCleanupService<S: RefreshTokenStore + 'static> {
    store: Arc<S>,
    config: TokenCleanupConfig,
}

impl<S: RefreshTokenStore + 'static> TokenCleanupService<S> {
    pub fn new(store: Arc<S>, config: TokenCleanupConfig) -> Self {
        Self { store, config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Oldest expiry still retained at `now`
    ///
    /// Fails when the retention reaches past the earliest representable time.
    pub fn cutoff_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, DomainError> {
        Duration::try_days(self.config.retention_days.max(0))
            .and_then(|retention| now.checked_sub_signed(retention))
            .ok_or_else(|| DomainError::Validation {
                message: format!(
                    "token cleanup retention out of range: {} days",
                    self.config.retention_days
                ),
            })
    }

    /// Run a single cleanup cycle
    ///
    /// Does nothing when the service is disabled.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let cutoff = self.cutoff_at(Utc::now())?;
        let deleted = self.store.delete_inactive_before(cutoff).await?;

        info!(deleted, cutoff = %cutoff, "Token cleanup completed");

        Ok(CleanupResult {
            tokens_deleted: deleted,
            cutoff: Some(cutoff),
        })
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` without spawning anything when disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("Token cleanup cycle failed: {}", e);
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of refresh tokens deleted
    pub tokens_deleted: usize,
    /// Expiry threshold used, `None` when nothing ran
    pub cutoff: Option<DateTime<Utc>>,
}
