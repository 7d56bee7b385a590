use actix_web::{web, HttpResponse};

use eb_core::repositories::{DataEntryRepository, TokenRepository, UserRepository};

use crate::dto::{AuthTokensResponse, LoginRequest};
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for POST /api/auth/login
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "accessToken": "eyJ...", "refreshToken": "base64...", "expiresIn": 3600 }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: "Invalid email or password", for unknown email and wrong password alike
pub async fn login<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthTokensResponse::from(response)),
        Err(error) => handle_domain_error(error),
    }
}
