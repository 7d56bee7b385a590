//! Bearer authentication middleware for protecting API endpoints.
//!
//! Extracts the access token from the `Authorization` header, verifies it
//! through an [`AccessTokenVerifier`] and injects an [`AuthContext`] into the
//! request. Any failure short-circuits with a JSON 401 carrying one generic
//! message.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::{header::AUTHORIZATION, StatusCode},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use eb_core::{
    domain::entities::token::Claims,
    errors::{DomainError, TokenError},
    repositories::TokenRepository,
    services::token::TokenService,
};
use eb_shared::{error_codes, ErrorResponse};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::debug;
use uuid::Uuid;

use crate::handlers::error::{error_response, INVALID_ACCESS_TOKEN_MESSAGE};

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID from the `sub` claim
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    /// JWT ID for tracing a single token
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self {
            user_id,
            email: claims.email,
            display_name: claims.name,
            jti: claims.jti,
        })
    }
}

/// Verifies access tokens for the middleware without naming the token store type
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError>;
}

impl<R: TokenRepository> AccessTokenVerifier for TokenService<R> {
    fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        TokenService::verify_access_token(self, token)
    }
}

/// Bearer authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    verifier: Arc<dyn AccessTokenVerifier>,
    /// Log decoded claims at debug level
    diagnostics: bool,
}

impl JwtAuth {
    pub fn new(verifier: Arc<dyn AccessTokenVerifier>) -> Self {
        Self {
            verifier,
            diagnostics: false,
        }
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
            diagnostics: self.diagnostics,
        }))
    }
}

/// Bearer authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AccessTokenVerifier>,
    diagnostics: bool,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);
        let diagnostics = self.diagnostics;

        Box::pin(async move {
            let authenticated = match extract_bearer_token(&req) {
                Some(token) => verifier
                    .verify_access_token(&token)
                    .and_then(|claims| {
                        if diagnostics {
                            debug!(
                                sub = %claims.sub,
                                email = %claims.email,
                                name = %claims.name,
                                exp = claims.exp,
                                "Decoded access token claims"
                            );
                        }
                        AuthContext::from_claims(claims)
                    }),
                None => Err(TokenError::InvalidTokenFormat.into()),
            };

            match authenticated {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    debug!(path = req.path(), reason = %e, "Bearer authentication failed");
                    Ok(req
                        .into_response(unauthorized_response())
                        .map_into_right_body())
                }
            }
        })
    }
}

fn unauthorized_response() -> actix_web::HttpResponse {
    error_response(
        StatusCode::UNAUTHORIZED,
        ErrorResponse::new(error_codes::UNAUTHORIZED, INVALID_ACCESS_TOKEN_MESSAGE),
    )
}

/// Extracts a non-empty Bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized(INVALID_ACCESS_TOKEN_MESSAGE));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_auth_context_rejects_non_uuid_subject() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            email: "a@example.com".to_string(),
            name: "A B".to_string(),
            iat: 0,
            nbf: 0,
            exp: 0,
            iss: "entrybook".to_string(),
            aud: "entrybook-api".to_string(),
            jti: "jti".to_string(),
        };
        assert!(AuthContext::from_claims(claims).is_err());
    }
}
