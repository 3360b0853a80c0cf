use actix_web::{web, HttpResponse};

use dt_core::repositories::RefreshTokenStore;

use crate::cookies::removal_cookie;
use crate::dto::LogoutAllResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/logout-all
///
/// Requires a Bearer access token. Revokes every active session of the caller;
/// access tokens already handed out stay valid until they expire.
///
/// ## Success (200 OK)
/// ```json
/// { "revoked": 3 }
/// ```
pub async fn logout_all<S>(
    auth: AuthContext,
    state: web::Data<AppState<S>>,
) -> Result<HttpResponse, ApiError>
where
    S: RefreshTokenStore + 'static,
{
    let revoked = state.token_service.revoke_all(auth.user_id).await?;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(&state.session))
        .json(LogoutAllResponse { revoked }))
}
