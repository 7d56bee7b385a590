use serde::{Deserialize, Serialize};
use validator::Validate;

use eb_core::domain::value_objects::AuthResponse;
use eb_core::services::auth::RegisterCommand;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Expected trimmed; see [`RegisterRequest::trimmed`]
    #[validate(
        length(min = 1, max = 255, message = "Email is required (max 255 characters)"),
        email(message = "Must be a valid email address")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "First name is required (max 100 characters)"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name is required (max 100 characters)"))]
    pub last_name: String,
}

impl RegisterRequest {
    /// Strip surrounding whitespace from the email before validation
    pub fn trimmed(mut self) -> Self {
        self.email = self.email.trim().to_string();
        self
    }
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
        }
    }
}

/// Login body; any failure surfaces as 401, so no field rules apply here
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: String,
}

/// Returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<AuthResponse> for AuthTokensResponse {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eb_shared::validation::NAME_MAX_LEN;

    #[test]
    fn test_register_request_uses_camel_case() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "ada@example.com",
            "password": "secret",
            "firstName": "Ada",
            "lastName": "Lovelace"
        }))
        .unwrap();

        assert_eq!(request.first_name, "Ada");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_empty_names() {
        let request = RegisterRequest {
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            first_name: String::new(),
            last_name: "x".repeat(NAME_MAX_LEN + 1),
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("last_name"));
    }

    #[test]
    fn test_register_request_rejects_malformed_emails() {
        for email in ["a@b..c", "a@-.x", "\"@x.y", "a@b.c;drop", "plain"] {
            let request = RegisterRequest {
                email: email.to_string(),
                password: "secret".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            };
            let errors = request.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("email"), "{email}");
        }
    }

    #[test]
    fn test_register_request_trims_email() {
        let request = RegisterRequest {
            email: "  Ada@Example.com ".to_string(),
            password: "secret".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
        .trimmed();

        assert_eq!(request.email, "Ada@Example.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_tokens_response_serializes_camel_case() {
        let body = serde_json::to_value(AuthTokensResponse {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_in: 3600,
        })
        .unwrap();

        assert_eq!(body["accessToken"], "a");
        assert_eq!(body["refreshToken"], "r");
        assert_eq!(body["expiresIn"], 3600);
    }
}
