use actix_web::{web, HttpResponse};
use validator::Validate;

use eb_core::repositories::{DataEntryRepository, TokenRepository, UserRepository};

use crate::dto::RegisterRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/auth/register
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "password": "...", "firstName": "Ada", "lastName": "Lovelace" }
/// ```
///
/// # Response
///
/// - 204 No Content: account created
/// - 400 Bad Request: email already registered or invalid input
pub async fn register<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    let request = request.into_inner().trimmed();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.register(request.into()).await {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(error),
    }
}
