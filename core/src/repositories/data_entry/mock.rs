//! Mock implementation of DataEntryRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::data_entry::DataEntry;
use crate::errors::DomainError;

use super::trait_::DataEntryRepository;

/// Mock data entry repository for testing
pub struct MockDataEntryRepository {
    entries: Arc<RwLock<HashMap<Uuid, DataEntry>>>,
}

impl MockDataEntryRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockDataEntryRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first(mut entries: Vec<DataEntry>) -> Vec<DataEntry> {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}

#[async_trait]
impl DataEntryRepository for MockDataEntryRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<DataEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(newest_first(
            entries
                .values()
                .filter(|e| e.is_owned_by(user_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_all(&self) -> Result<Vec<DataEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(newest_first(entries.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DataEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&id).cloned())
    }

    async fn create(&self, entry: DataEntry) -> Result<DataEntry, DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update(&self, entry: &DataEntry) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&entry.id) {
            Some(stored) if stored.is_owned_by(entry.user_id) => {
                *stored = entry.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        match entries.get(&id) {
            Some(stored) if stored.is_owned_by(user_id) => {
                entries.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
