use actix_web::{web, HttpResponse};

use dt_core::pagination::PageRequest;
use dt_core::repositories::RefreshTokenStore;
use dt_shared::PageQuery;

use crate::dto::SessionResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for GET /api/v1/sessions?limit=&cursor=
///
/// Lists the caller's refresh tokens oldest first, one page at a time.
/// `next_cursor` is present only while more items remain.
///
/// ## Errors
/// - 400 Bad Request: cursor not produced by this endpoint
/// - 401 Unauthorized: missing or invalid access token
pub async fn list_sessions<S>(
    auth: AuthContext,
    query: web::Query<PageQuery>,
    state: web::Data<AppState<S>>,
) -> Result<HttpResponse, ApiError>
where
    S: RefreshTokenStore + 'static,
{
    let request = PageRequest::from_query(&query, &state.pagination)?;

    let page = state
        .token_service
        .list_sessions(auth.user_id, &request)
        .await?
        .map(SessionResponse::from)
        .into_cursor_page();

    Ok(HttpResponse::Ok().json(page))
}
