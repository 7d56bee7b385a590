//! Main token service implementation

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Number of random bytes behind each refresh token
const REFRESH_TOKEN_BYTES: usize = 64;

/// SHA-256 hex digest under which a refresh token is stored
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Service for minting and checking access tokens and refresh tokens
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository for refresh token persistence
    /// * `config` - Token service configuration
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Access token lifetime in seconds, reported to clients as `expires_in`
    pub fn access_token_lifetime(&self) -> i64 {
        self.config.access_token_expiry_seconds
    }

    /// Mints a signed access token for `user`
    pub fn issue_access_token(&self, user: &User) -> Result<String, DomainError> {
        let claims = Claims::for_user(
            user,
            self.config.access_token_expiry_seconds,
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns the claims
    ///
    /// Checks signature, expiry, not-before, issuer and audience with zero leeway.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError::Token(_))` - Token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                let error = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::InvalidIssuer
                    | ErrorKind::InvalidAudience
                    | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
                    _ => TokenError::InvalidTokenFormat,
                };
                debug!(reason = %error, "access token rejected");
                DomainError::Token(error)
            })?;

        if token_data.claims.user_id().is_err() {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        Ok(token_data.claims)
    }

    /// Generates a fresh opaque refresh token (64 random bytes, base64)
    pub fn generate_refresh_token(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        STANDARD.encode(bytes)
    }

    /// Builds the record stored for `token`
    fn refresh_record(&self, user_id: Uuid, token: &str) -> RefreshToken {
        RefreshToken::new(
            user_id,
            hash_token(token),
            self.config.refresh_token_expiry_seconds,
        )
    }

    /// Mints and stores a new refresh token for `user_id`
    ///
    /// # Returns
    ///
    /// The plaintext token; only its digest is persisted
    pub async fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let token = self.generate_refresh_token();
        self.repository
            .save_refresh_token(self.refresh_record(user_id, &token))
            .await?;
        Ok(token)
    }

    /// Looks up a presented refresh token and requires it to be active
    ///
    /// Unknown, revoked and expired tokens all yield `InvalidRefreshToken`.
    pub async fn find_active_refresh_token(&self, token: &str) -> Result<RefreshToken, DomainError> {
        let record = self
            .repository
            .find_refresh_token(&hash_token(token))
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if record.is_revoked {
            warn!(token_id = %record.id, user_id = %record.user_id, "revoked refresh token presented");
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }
        if record.is_expired() {
            debug!(token_id = %record.id, "expired refresh token presented");
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        Ok(record)
    }

    /// Revokes the presented token and stores a replacement in one atomic step
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The replacement refresh token
    /// * `Err(DomainError::Token(InvalidRefreshToken))` - The presented token was
    ///   no longer active, e.g. a concurrent refresh already rotated it
    pub async fn rotate_refresh_token(
        &self,
        presented: &str,
        user_id: Uuid,
    ) -> Result<String, DomainError> {
        let replacement = self.generate_refresh_token();
        let rotated = self
            .repository
            .rotate_refresh_token(&hash_token(presented), self.refresh_record(user_id, &replacement))
            .await?;

        if !rotated {
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }
        Ok(replacement)
    }

    /// Revokes a specific refresh token
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - An active token was revoked
    /// * `Ok(false)` - Unknown or already revoked
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<bool, DomainError> {
        self.repository.revoke_token(&hash_token(token)).await
    }
}
