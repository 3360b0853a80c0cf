//! MySQL implementations of the core store contracts

mod refresh_token_store;

pub use refresh_token_store::MySqlRefreshTokenStore;
