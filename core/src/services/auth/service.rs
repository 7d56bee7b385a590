//! Main authentication service implementation

use std::sync::Arc;

use eb_shared::validation::{normalize_email, EMAIL_MAX_LEN, NAME_MAX_LEN};
use tracing::{debug, info, warn};
use validator::ValidateEmail;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::user::{NewUser, User};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

/// Hashed when the service is built and verified against when the email is
/// unknown, so that unknown-email and wrong-password logins cost the same.
const TIMING_DUMMY_PASSWORD: &str = "entrybook-timing-equalizer";

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Authentication service managing the token lifecycle
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// User repository for credential lookups
    user_repository: Arc<U>,
    /// Token service for JWT and refresh token management
    token_service: Arc<TokenService<T>>,
    /// Password hashing primitive
    password_hasher: Arc<dyn PasswordHasher>,
    /// Hash of [`TIMING_DUMMY_PASSWORD`] at the configured cost
    dummy_hash: String,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for token management
    /// * `password_hasher` - Password hashing primitive
    ///
    /// Hashes the timing dummy up front, so this blocks for one bcrypt round.
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> DomainResult<Self> {
        let dummy_hash = password_hasher.hash_blocking(TIMING_DUMMY_PASSWORD)?;
        Ok(Self {
            user_repository,
            token_service,
            password_hasher,
            dummy_hash,
        })
    }

    /// Access to the token service (used by the bearer middleware)
    pub fn token_service(&self) -> &Arc<TokenService<T>> {
        &self.token_service
    }

    /// Register a new account
    ///
    /// The email is trimmed and lowercased for uniqueness, names are trimmed
    /// and the password is stored as a bcrypt hash.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    /// * `Err(DomainError::Validation(_))` - Malformed input
    pub async fn register(&self, command: RegisterCommand) -> DomainResult<User> {
        validate_registration(&command)?;

        let email_normalized = normalize_email(&command.email);
        if self.user_repository.exists_by_email(&email_normalized).await? {
            info!("Registration rejected: email already registered");
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.password_hasher.hash(&command.password).await?;
        let user = User::new(NewUser {
            email: command.email,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
        });

        // The store's unique index catches a concurrent registration of the
        // same email and reports it as UserAlreadyExists.
        let user = self.user_repository.create(user).await?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password produce the same error.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - A new access token and refresh token
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Bad credentials
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email_normalized = normalize_email(email);

        let user = match self.user_repository.find_by_email(&email_normalized).await? {
            Some(user) => user,
            None => {
                self.burn_dummy_verify(password).await?;
                info!("Login failed: invalid credentials");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self
            .password_hasher
            .verify(password, &user.password_hash)
            .await?
        {
            info!(user_id = %user.id, "Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = self.token_service.issue_access_token(&user)?;
        let refresh_token = self.token_service.issue_refresh_token(user.id).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(self.response(access_token, refresh_token))
    }

    /// Exchange a refresh token for a new access token and a rotated refresh token
    ///
    /// The presented token is revoked and its replacement stored atomically, so
    /// of two concurrent refreshes with the same token exactly one succeeds.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - New token pair
    /// * `Err(DomainError::Token(TokenError::InvalidRefreshToken))` - Unknown,
    ///   revoked or expired token, or the owning user no longer exists
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        let record = self
            .token_service
            .find_active_refresh_token(refresh_token)
            .await?;

        let user = match self.user_repository.find_by_id(record.user_id).await? {
            Some(user) => user,
            None => {
                warn!(user_id = %record.user_id, "Refresh token belongs to a missing user");
                return Err(TokenError::InvalidRefreshToken.into());
            }
        };

        let access_token = self.token_service.issue_access_token(&user)?;
        let rotated = self
            .token_service
            .rotate_refresh_token(refresh_token, user.id)
            .await?;

        debug!(user_id = %user.id, "Refresh token rotated");
        Ok(self.response(access_token, rotated))
    }

    /// Revoke a refresh token; unknown or already revoked tokens are a no-op
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        if self.token_service.revoke_refresh_token(refresh_token).await? {
            info!("Refresh token revoked on logout");
        } else {
            debug!("Logout with unknown or inactive refresh token");
        }
        Ok(())
    }

    /// Verify an access token and return its claims
    pub fn verify(&self, access_token: &str) -> DomainResult<Claims> {
        self.token_service.verify_access_token(access_token)
    }

    fn response(&self, access_token: String, refresh_token: String) -> AuthResponse {
        TokenPair::new(
            access_token,
            refresh_token,
            self.token_service.access_token_lifetime(),
        )
        .into()
    }

    async fn burn_dummy_verify(&self, password: &str) -> DomainResult<()> {
        self.password_hasher
            .verify(password, &self.dummy_hash)
            .await?;
        Ok(())
    }
}

fn validate_registration(command: &RegisterCommand) -> Result<(), ValidationError> {
    let email = command.email.trim();
    if email.is_empty() {
        return Err(required("email"));
    }
    if !email.validate_email() {
        return Err(ValidationError::InvalidEmail);
    }
    ValidationError::ensure_max_len("email", email, EMAIL_MAX_LEN)?;

    if command.password.is_empty() {
        return Err(required("password"));
    }

    for (field, value) in [
        ("firstName", command.first_name.trim()),
        ("lastName", command.last_name.trim()),
    ] {
        if value.is_empty() {
            return Err(required(field));
        }
        ValidationError::ensure_max_len(field, value, NAME_MAX_LEN)?;
    }
    Ok(())
}

fn required(field: &str) -> ValidationError {
    ValidationError::RequiredField {
        field: field.to_string(),
    }
}
