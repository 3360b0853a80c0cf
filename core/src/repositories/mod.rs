//! Persistence contracts for domain entities

pub mod refresh_token;

pub use refresh_token::{InMemoryRefreshTokenStore, RefreshTokenStore};
