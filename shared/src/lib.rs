//! Shared utilities and common types for the Entrybook server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The standard error response body
//! - Input normalization helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LogFormat, LoggingConfig, PasswordConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
