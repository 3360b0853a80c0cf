//! Page size limits shared by every list endpoint

use serde::{Deserialize, Serialize};

/// Page size used when the caller omits `limit` or sends a non-positive one
pub const DEFAULT_LIMIT: u32 = 2;

/// Hard upper bound on `limit`
pub const MAX_LIMIT: u32 = 10;

/// Pagination limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationConfig {
    /// Page size when none (or a non-positive one) is requested
    pub default_limit: u32,

    /// Largest page size a caller may request
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl PaginationConfig {
    /// Clamp a requested page size: `<= 0` or absent falls back to the
    /// default, anything above the maximum is capped
    pub fn clamp_limit(&self, requested: Option<i64>) -> u32 {
        match requested {
            Some(n) if n <= 0 => self.default_limit,
            Some(n) if n > self.max_limit as i64 => self.max_limit,
            Some(n) => n as u32,
            None => self.default_limit,
        }
    }
}
