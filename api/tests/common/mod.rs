//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{cookie::Cookie, dev::ServiceResponse, web};
use dt_api::AppState;
use dt_core::domain::entities::{Session, UserId};
use dt_core::repositories::InMemoryRefreshTokenStore;
use dt_core::services::{SigningSecret, TokenService, TokenServiceConfig};
use dt_shared::config::{PaginationConfig, SessionConfig};

pub const REFRESH_COOKIE: &str = "refresh_token";

pub struct TestContext {
    pub store: Arc<InMemoryRefreshTokenStore>,
    pub service: Arc<TokenService<InMemoryRefreshTokenStore>>,
    pub state: web::Data<AppState<InMemoryRefreshTokenStore>>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryRefreshTokenStore::new());
        let secret = SigningSecret::new("integration-test-secret").unwrap();
        let service = Arc::new(TokenService::new(
            Arc::clone(&store),
            TokenServiceConfig::new(secret),
        ));
        let state = web::Data::new(AppState::new(
            Arc::clone(&service),
            SessionConfig::default(),
            PaginationConfig::default(),
        ));

        Self {
            store,
            service,
            state,
        }
    }

    /// A logged in user, as the login flow would leave it
    pub async fn login(&self, user_id: UserId) -> Session {
        self.service.issue_session(user_id).await.unwrap()
    }
}

pub fn refresh_cookie(value: &str) -> Cookie<'static> {
    Cookie::new(REFRESH_COOKIE, value.to_string())
}

/// The refresh cookie set by a response, if any
pub fn response_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == REFRESH_COOKIE)
        .map(|c| c.into_owned())
}
