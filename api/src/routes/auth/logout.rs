use actix_web::{web, HttpRequest, HttpResponse};

use dt_core::repositories::RefreshTokenStore;

use crate::cookies::{read_refresh_cookie, removal_cookie};
use crate::handlers::ApiError;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the refresh token in the cookie, if any, and always clears the
/// cookie. Logging out twice is not an error.
///
/// ## Success (204 No Content)
///
/// ## Errors
/// - 503 Service Unavailable: token storage unreachable
pub async fn logout<S>(
    req: HttpRequest,
    state: web::Data<AppState<S>>,
) -> Result<HttpResponse, ApiError>
where
    S: RefreshTokenStore + 'static,
{
    if let Some(presented) = read_refresh_cookie(&req, &state.session) {
        state.token_service.revoke(&presented).await?;
    }

    Ok(HttpResponse::NoContent()
        .cookie(removal_cookie(&state.session))
        .finish())
}
