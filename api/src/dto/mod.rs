//! Request and response bodies

pub mod auth;
pub mod sessions;

pub use auth::{LogoutAllResponse, TokenResponse};
pub use sessions::SessionResponse;
