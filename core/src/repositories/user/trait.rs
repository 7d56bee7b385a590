//! User repository trait defining the interface for user data persistence.
//!
//! Lookups by email always take the normalized form (trimmed, lowercased);
//! callers normalize before calling.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with that email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email_normalized: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find every user whose ID is in `ids`; unknown IDs are skipped
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError>;

    /// Check if a user exists with the given normalized email
    async fn exists_by_email(&self, email_normalized: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email_normalized).await?.is_some())
    }

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - The normalized
    ///   email is already taken, including when a concurrent insert won the race
    /// * `Err(DomainError)` - Database or other error occurred
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
