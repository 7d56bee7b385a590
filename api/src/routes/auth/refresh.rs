use actix_web::{web, HttpResponse};

use eb_core::repositories::{DataEntryRepository, TokenRepository, UserRepository};

use crate::dto::{AuthTokensResponse, RefreshTokenRequest};
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for POST /api/auth/refresh
///
/// Exchanges a refresh token for a new access token and a new refresh
/// token. The presented token is revoked and cannot be used again.
///
/// # Errors
/// - 401 Unauthorized: "Invalid refresh token" (unknown, revoked or expired)
pub async fn refresh<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(response) => HttpResponse::Ok().json(AuthTokensResponse::from(response)),
        Err(error) => handle_domain_error(error),
    }
}
