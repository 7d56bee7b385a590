//! Shared setup for the HTTP tests: in-memory stores, cheap bcrypt cost.

#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use actix_web::web;

use eb_api::AppState;
use eb_core::services::seed_demo_data;
use eb_infra::{InMemoryDataEntryRepository, InMemoryTokenRepository, InMemoryUserRepository};
use eb_shared::{AuthConfig, JwtConfig, PasswordConfig, ServerConfig};

pub type TestState =
    AppState<InMemoryUserRepository, InMemoryTokenRepository, InMemoryDataEntryRepository>;

pub const PASSWORD: &str = "CorrectHorse1!";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt: JwtConfig::new("integration-test-secret"),
        password: PasswordConfig { bcrypt_cost: 4 },
        diagnostics: true,
    }
}

pub fn server_config() -> ServerConfig {
    ServerConfig::default()
}

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<InMemoryUserRepository>,
    pub entries: Arc<InMemoryDataEntryRepository>,
}

pub fn state_with(
    config: &AuthConfig,
) -> (TestState, Arc<InMemoryUserRepository>, Arc<InMemoryDataEntryRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let entries = Arc::new(InMemoryDataEntryRepository::new());
    let state = AppState::new(
        Arc::clone(&users),
        InMemoryTokenRepository::new(),
        Arc::clone(&entries),
        config,
    )
    .unwrap();
    (state, users, entries)
}

pub fn context_with(config: &AuthConfig) -> TestContext {
    let (state, users, entries) = state_with(config);
    let state = web::Data::new(state);
    TestContext {
        state,
        users,
        entries,
    }
}

pub fn context() -> TestContext {
    context_with(&auth_config())
}

/// Context with the demo user and its two entries
pub async fn seeded_context() -> TestContext {
    let ctx = context();
    seed_demo_data(
        ctx.users.as_ref(),
        ctx.entries.as_ref(),
        ctx.state.password_hasher.as_ref(),
    )
    .await
    .unwrap();
    ctx
}

/// Call the service and return `(status, body)`; an empty body reads as `Null`
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service($app, $req).await;
        let status = resp.status();
        let bytes = actix_web::test::read_body(resp).await;
        let body: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }};
}

/// POST a JSON body
macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        send!($app, req)
    }};
}

/// Send a request carrying a bearer token
macro_rules! authed {
    ($app:expr, $builder:expr, $token:expr) => {{
        let req = $builder
            .insert_header((
                actix_web::http::header::AUTHORIZATION,
                format!("Bearer {}", $token),
            ))
            .to_request();
        send!($app, req)
    }};
}

/// Register and log in; evaluates to the login response body
macro_rules! register_and_login {
    ($app:expr, $email:expr, $first:expr, $last:expr) => {{
        let (status, _) = post_json!(
            $app,
            "/api/auth/register",
            serde_json::json!({
                "email": $email,
                "password": common::PASSWORD,
                "firstName": $first,
                "lastName": $last
            })
        );
        assert_eq!(status, actix_web::http::StatusCode::NO_CONTENT);

        let (status, body) = post_json!(
            $app,
            "/api/auth/login",
            serde_json::json!({ "email": $email, "password": common::PASSWORD })
        );
        assert_eq!(status, actix_web::http::StatusCode::OK);
        body
    }};
}
