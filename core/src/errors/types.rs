//! Error types for authentication, token management and input validation

use eb_shared::validation::check_max_len;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User with this email already exists")]
    UserAlreadyExists,

    /// Unknown email and wrong password share this variant
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid claims")]
    InvalidClaims,

    /// Unknown, revoked or expired refresh token, or its owner is gone
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Too long: {field} (max: {max}, actual: {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Too many decimal places: {field} (max: {max_scale})")]
    TooPrecise { field: String, max_scale: u32 },

    #[error("Invalid email")]
    InvalidEmail,
}

impl ValidationError {
    /// Name of the offending input field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooPrecise { field, .. } => field,
            ValidationError::InvalidEmail => "email",
        }
    }

    /// `TooLong` when `value` exceeds `max` characters
    pub fn ensure_max_len(field: &str, value: &str, max: usize) -> Result<(), Self> {
        check_max_len(value, max).map_err(|actual| ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        })
    }
}
