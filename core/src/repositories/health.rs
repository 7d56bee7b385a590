//! Store liveness probe

use async_trait::async_trait;

use crate::errors::DomainError;

/// Reports whether the backing store is reachable
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn check(&self) -> Result<(), DomainError>;
}
