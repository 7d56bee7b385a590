use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use eb_core::domain::entities::data_entry::DataEntry;
use eb_core::errors::DomainError;
use eb_core::repositories::DataEntryRepository;

/// Data entries held in process memory
#[derive(Default)]
pub struct InMemoryDataEntryRepository {
    entries: RwLock<HashMap<Uuid, DataEntry>>,
}

impl InMemoryDataEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn newest_first(mut entries: Vec<DataEntry>) -> Vec<DataEntry> {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}

#[async_trait]
impl DataEntryRepository for InMemoryDataEntryRepository {
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
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn create(&self, entry: DataEntry) -> Result<DataEntry, DomainError> {
        self.entries.write().await.insert(entry.id, entry.clone());
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
