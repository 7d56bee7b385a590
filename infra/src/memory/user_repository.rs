use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use eb_core::domain::entities::user::User;
use eb_core::errors::{AuthError, DomainError};
use eb_core::repositories::UserRepository;

#[derive(Default)]
struct UserTable {
    by_id: HashMap<Uuid, User>,
    /// email_normalized -> id
    email_index: HashMap<String, Uuid>,
}

/// Users held in process memory, unique by normalized email
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users
    pub async fn len(&self) -> usize {
        self.table.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email_normalized: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .email_index
            .get(email_normalized)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        let table = self.table.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| table.by_id.get(id))
            .cloned()
            .collect())
    }

    async fn exists_by_email(&self, email_normalized: &str) -> Result<bool, DomainError> {
        Ok(self
            .table
            .read()
            .await
            .email_index
            .contains_key(email_normalized))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.email_index.contains_key(&user.email_normalized) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        table
            .email_index
            .insert(user.email_normalized.clone(), user.id);
        table.by_id.insert(user.id, user.clone());

        Ok(user)
    }
}
