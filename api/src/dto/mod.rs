//! Request and response bodies (camelCase JSON)

pub mod auth;
pub mod data_entry;

pub use auth::{AuthTokensResponse, LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest};
pub use data_entry::{DataEntryRequest, DataEntryResponse};
