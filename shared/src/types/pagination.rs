//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

/// Query parameters accepted by every cursor-paginated list endpoint
///
/// `limit` is signed so that non-positive values reach the clamping rule
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    /// Requested page size
    #[serde(default)]
    pub limit: Option<i64>,

    /// Opaque continuation marker from a previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl PageQuery {
    /// Page size after applying the configured default and maximum
    pub fn effective_limit(&self, config: &PaginationConfig) -> u32 {
        config.clamp_limit(self.limit)
    }

    /// The cursor, treating an empty parameter as absent
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// Response for cursor-based pagination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorPage<T> {
    /// The data items
    pub data: Vec<T>,

    /// Cursor for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,

    /// Whether there are more items
    pub has_more: bool,
}

impl<T> CursorPage<T> {
    /// Create a new page
    pub fn new(data: Vec<T>, next_cursor: Option<String>) -> Self {
        let has_more = next_cursor.is_some();
        Self {
            data,
            next_cursor,
            has_more,
        }
    }

    /// Transform the data items using a function
    pub fn map<U, F>(self, f: F) -> CursorPage<U>
    where
        F: FnMut(T) -> U,
    {
        CursorPage {
            data: self.data.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }

    /// Check if the page is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
