use actix_web::{web, HttpResponse};

use eb_core::repositories::{DataEntryRepository, TokenRepository, UserRepository};

use crate::dto::LogoutRequest;
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for POST /api/auth/logout
///
/// Revokes the presented refresh token if it exists. Unknown, already
/// revoked, empty or missing tokens are accepted silently.
///
/// # Response
/// - 204 No Content
pub async fn logout<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    request: Option<web::Json<LogoutRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    let refresh_token = request
        .map(|body| body.into_inner().refresh_token)
        .unwrap_or_default();

    match state.auth_service.logout(&refresh_token).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(error),
    }
}
