//! Type definitions shared by the API and domain layers
//!
//! - `pagination` - Query and response shapes for cursor-paginated list endpoints

pub mod pagination;

pub use pagination::{CursorPage, PageQuery};
