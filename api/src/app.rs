//! Application factory
//!
//! Builds the actix-web `App` with request tracing, CORS, JSON error
//! handling, the public auth routes and the bearer-protected data entry
//! routes.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing::warn;
use tracing_actix_web::TracingLogger;

use eb_core::repositories::{DataEntryRepository, TokenRepository, UserRepository};
use eb_shared::{error_codes, ErrorResponse, ServerConfig};

use crate::handlers::error::{json_error_handler, path_error_handler};
use crate::middleware::{
    auth::{AccessTokenVerifier, JwtAuth},
    cors::create_cors,
};
use crate::routes::{auth, data_entries, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    server: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = state.auth_service.token_service().clone();
    let bearer = JwtAuth::new(verifier).with_diagnostics(state.diagnostics);

    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        // Registration order is inside-out: CORS answers preflights before tracing sees them
        .wrap(TracingLogger::default())
        .wrap(create_cors(&server.cors))
        .route("/health", web::get().to(health_check::<U, T, D>))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register::<U, T, D>))
                        .route("/login", web::post().to(auth::login::<U, T, D>))
                        .route("/refresh", web::post().to(auth::refresh::<U, T, D>))
                        .route("/logout", web::post().to(auth::logout::<U, T, D>)),
                )
                .service(
                    web::scope("/dataentries")
                        .wrap(bearer)
                        .route("", web::get().to(data_entries::list_personal::<U, T, D>))
                        .route("", web::post().to(data_entries::create_entry::<U, T, D>))
                        .route("/all", web::get().to(data_entries::list_all::<U, T, D>))
                        .route("/{id}", web::get().to(data_entries::get_entry::<U, T, D>))
                        .route("/{id}", web::put().to(data_entries::update_entry::<U, T, D>))
                        .route(
                            "/{id}",
                            web::delete().to(data_entries::delete_entry::<U, T, D>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// 503 when the configured store does not answer.
async fn health_check<U, T, D>(state: web::Data<AppState<U, T, D>>) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    let store = match &state.store_health {
        None => "memory",
        Some(probe) => match probe.check().await {
            Ok(()) => "up",
            Err(e) => {
                warn!(error = %e, "Store health check failed");
                "down"
            }
        },
    };

    let (mut response, status) = if store == "down" {
        (HttpResponse::ServiceUnavailable(), "unhealthy")
    } else {
        (HttpResponse::Ok(), "healthy")
    };
    response.json(serde_json::json!({
        "status": status,
        "store": store,
        "service": "entrybook-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
