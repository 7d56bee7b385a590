//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence operations
///
/// Records are keyed by the SHA-256 digest of the opaque token; the plaintext
/// never reaches the store. Records are never deleted, only revoked.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token record
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token
    /// * `Err(DomainError)` - Save failed (e.g., duplicate digest)
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by exact digest match
    ///
    /// Revoked and expired records are returned as well; callers decide.
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Atomically revoke the presented token and insert its replacement
    ///
    /// The presented record is revoked only if it is still active (not revoked,
    /// not expired). When that matches nothing, no replacement is inserted.
    ///
    /// # Returns
    /// * `Ok(true)` - Presented token revoked and replacement stored
    /// * `Ok(false)` - Presented token was unknown, revoked or expired
    /// * `Err(DomainError)` - Store failure; neither step took effect
    async fn rotate_refresh_token(
        &self,
        presented_hash: &str,
        replacement: RefreshToken,
    ) -> Result<bool, DomainError>;

    /// Revoke a specific refresh token
    ///
    /// # Returns
    /// * `Ok(true)` - Token was active and is now revoked
    /// * `Ok(false)` - Token not found or already revoked
    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError>;
}
