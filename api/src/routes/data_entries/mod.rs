//! Data entry route handlers
//!
//! Every handler runs behind the bearer middleware and scopes personal
//! queries to the authenticated user. An entry owned by someone else is
//! reported exactly like a missing one (404).

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use eb_core::domain::entities::DataEntryView;
use eb_core::repositories::{DataEntryRepository, TokenRepository, UserRepository};

use crate::dto::{DataEntryRequest, DataEntryResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

fn to_responses(views: Vec<DataEntryView>) -> Vec<DataEntryResponse> {
    views.into_iter().map(DataEntryResponse::from).collect()
}

/// Handler for GET /api/dataentries: the caller's entries, newest first
pub async fn list_personal<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    match state.data_entry_service.list_personal(auth.user_id).await {
        Ok(views) => HttpResponse::Ok().json(to_responses(views)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/dataentries/all: every user's entries, read-only
pub async fn list_all<U, T, D>(state: web::Data<AppState<U, T, D>>, _auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    match state.data_entry_service.list_all().await {
        Ok(views) => HttpResponse::Ok().json(to_responses(views)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/dataentries/{id}
pub async fn get_entry<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    match state
        .data_entry_service
        .get(auth.user_id, path.into_inner())
        .await
    {
        Ok(view) => HttpResponse::Ok().json(DataEntryResponse::from(view)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/dataentries
///
/// - 201 Created with the stored entry
/// - 400 Bad Request on invalid input
pub async fn create_entry<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
    request: web::Json<DataEntryRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .data_entry_service
        .create(auth.user_id, request.into())
        .await
    {
        Ok(view) => HttpResponse::Created().json(DataEntryResponse::from(view)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/dataentries/{id}
pub async fn update_entry<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<DataEntryRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .data_entry_service
        .update(auth.user_id, path.into_inner(), request.into())
        .await
    {
        Ok(view) => HttpResponse::Ok().json(DataEntryResponse::from(view)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/dataentries/{id}
pub async fn delete_entry<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    match state
        .data_entry_service
        .delete(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(error),
    }
}
