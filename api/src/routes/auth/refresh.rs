use actix_web::{web, HttpRequest, HttpResponse};

use dt_core::repositories::RefreshTokenStore;

use crate::cookies::{read_refresh_cookie, refresh_cookie};
use crate::dto::TokenResponse;
use crate::handlers::ApiError;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Consumes the refresh token carried in the cookie and answers with a new
/// access token, setting the replacement refresh token as the cookie.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: cookie missing, unknown, revoked, expired or already used
/// - 503 Service Unavailable: token storage unreachable
pub async fn refresh<S>(
    req: HttpRequest,
    state: web::Data<AppState<S>>,
) -> Result<HttpResponse, ApiError>
where
    S: RefreshTokenStore + 'static,
{
    let presented = read_refresh_cookie(&req, &state.session)
        .ok_or(ApiError::AuthenticationRequired("Missing refresh token"))?;

    let session = state.token_service.rotate(&presented).await?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(&state.session, &session.refresh_token))
        .json(TokenResponse::bearer(
            session.access_token,
            session.access_expires_in,
        )))
}
