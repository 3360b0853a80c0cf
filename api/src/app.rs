//! Application factory
//!
//! Builds the Actix-web application around an [`AppState`]. Request tracing
//! is added by the caller so tests can drive the bare application.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};

use dt_core::repositories::RefreshTokenStore;
use dt_shared::{error_codes, ErrorResponse};

use crate::handlers::ApiError;
use crate::middleware::JwtAuth;
use crate::routes::{
    auth::{logout, logout_all, refresh},
    health::health,
    sessions::list_sessions,
};
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<S>(
    app_state: web::Data<AppState<S>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
>
where
    S: RefreshTokenStore + 'static,
{
    let jwt_auth = JwtAuth::new(app_state.token_service.coder().clone());

    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    App::new()
        .app_data(app_state)
        .app_data(query_config)
        .route("/health", web::get().to(health))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/refresh", web::post().to(refresh::<S>))
                        .route("/logout", web::post().to(logout::<S>))
                        .service(
                            web::resource("/logout-all")
                                .wrap(jwt_auth.clone())
                                .route(web::post().to(logout_all::<S>)),
                        ),
                )
                .service(
                    web::resource("/sessions")
                        .wrap(jwt_auth)
                        .route(web::get().to(list_sessions::<S>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
