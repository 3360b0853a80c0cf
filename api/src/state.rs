//! Shared application state handed to every handler

use std::sync::Arc;

use dt_core::repositories::RefreshTokenStore;
use dt_core::services::TokenService;
use dt_shared::config::{PaginationConfig, SessionConfig};

/// Application state for all routes
pub struct AppState<S: RefreshTokenStore> {
    pub token_service: Arc<TokenService<S>>,
    pub session: SessionConfig,
    pub pagination: PaginationConfig,
}

impl<S: RefreshTokenStore> AppState<S> {
    pub fn new(
        token_service: Arc<TokenService<S>>,
        session: SessionConfig,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            token_service,
            session,
            pagination,
        }
    }
}
