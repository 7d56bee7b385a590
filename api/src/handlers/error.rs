//! Mapping from domain and request errors to HTTP responses.
//!
//! Every error body is an [`ErrorResponse`]. Internal failures are logged
//! with their cause and answered with a generic message.

use std::collections::HashMap;

use actix_web::{
    error::{InternalError, JsonPayloadError, PathError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use eb_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use eb_shared::{error_codes, ErrorResponse};
use serde_json::Value;
use tracing::{error, warn};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const INVALID_REFRESH_TOKEN_MESSAGE: &str = "Invalid refresh token";
pub const INVALID_ACCESS_TOKEN_MESSAGE: &str = "Invalid or expired access token";
pub const ENTRY_NOT_FOUND_MESSAGE: &str = "Data entry not found";
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Serialize `body` with the given status
pub fn error_response(status: StatusCode, body: ErrorResponse) -> HttpResponse {
    HttpResponse::build(status).json(body)
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Validation(validation) => {
            warn!(field = validation.field(), "Validation failed: {}", validation);
            let field = validation.field().to_string();
            error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(error_codes::VALIDATION_ERROR, "Validation failed")
                    .add_detail(field, vec![validation_message(&validation)]),
            )
        }
        DomainError::Auth(AuthError::UserAlreadyExists) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::USER_EXISTS, AuthError::UserAlreadyExists.to_string()),
        ),
        DomainError::Auth(AuthError::InvalidCredentials) => error_response(
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::INVALID_CREDENTIALS, INVALID_CREDENTIALS_MESSAGE),
        ),
        DomainError::Token(token_error) => {
            let code = match token_error {
                TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
                _ => error_codes::TOKEN_INVALID,
            };
            error_response(
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(code, INVALID_REFRESH_TOKEN_MESSAGE),
            )
        }
        DomainError::NotFound { .. } => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, ENTRY_NOT_FOUND_MESSAGE),
        ),
        DomainError::Internal { message } => {
            error!(%message, "Internal error while handling request");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_ERROR_MESSAGE),
            )
        }
    }
}

fn validation_message(error: &ValidationError) -> String {
    match error {
        ValidationError::RequiredField { .. } => "This field is required".to_string(),
        ValidationError::TooLong { max, .. } => format!("Must be at most {} characters", max),
        ValidationError::OutOfRange { min, max, .. } => {
            format!("Must be between {} and {}", min, max)
        }
        ValidationError::TooPrecise { max_scale, .. } => {
            format!("Must have at most {} decimal places", max_scale)
        }
        ValidationError::InvalidEmail => "Must be a valid email address".to_string(),
    }
}

/// 400 with one entry per offending field, keyed by its JSON (camelCase) name
pub fn handle_validation_errors(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut details: HashMap<String, Value> = HashMap::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(to_camel_case(&field), Value::from(messages));
    }

    warn!(fields = ?details.keys().collect::<Vec<_>>(), "Request validation failed");

    error_response(
        StatusCode::BAD_REQUEST,
        ErrorResponse::with_details(error_codes::VALIDATION_ERROR, "Validation failed", details),
    )
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `JsonConfig` error handler: malformed bodies become a JSON 400
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "Rejected malformed JSON body");
    let response = error_response(
        StatusCode::BAD_REQUEST,
        ErrorResponse::new(error_codes::BAD_REQUEST, "Malformed request body"),
    );
    InternalError::from_response(err, response).into()
}

/// `PathConfig` error handler: an unparsable entry ID is simply not found
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(
        StatusCode::NOT_FOUND,
        ErrorResponse::new(error_codes::NOT_FOUND, ENTRY_NOT_FOUND_MESSAGE),
    );
    InternalError::from_response(err, response).into()
}
