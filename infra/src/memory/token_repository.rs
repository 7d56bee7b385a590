use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use eb_core::domain::entities::token::RefreshToken;
use eb_core::errors::DomainError;
use eb_core::repositories::TokenRepository;

/// Refresh token records keyed by token digest
#[derive(Default)]
pub struct InMemoryTokenRepository {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records, revoked ones included
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token_hash) {
            return Err(DomainError::internal("Refresh token digest collision"));
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self.tokens.read().await.get(token_hash).cloned())
    }

    async fn rotate_refresh_token(
        &self,
        presented_hash: &str,
        replacement: RefreshToken,
    ) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&replacement.token_hash) {
            return Err(DomainError::internal("Refresh token digest collision"));
        }

        match tokens.get_mut(presented_hash) {
            Some(token) if token.is_active() => token.revoke(),
            _ => return Ok(false),
        }

        tokens.insert(replacement.token_hash.clone(), replacement);
        Ok(true)
    }

    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token_hash) {
            Some(token) if !token.is_revoked => {
                token.revoke();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
