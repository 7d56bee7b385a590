//! Token service module
//!
//! Access tokens are HS256 JWTs that are never stored. Refresh tokens are
//! opaque random strings whose SHA-256 digest is kept by the token repository.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{hash_token, TokenService};
