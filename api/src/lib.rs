//! # Entrybook API
//!
//! actix-web application exposing registration, login, token refresh and
//! logout under `/api/auth`, and owner-scoped data entries under
//! `/api/dataentries`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::AppState;
