//! Data entry repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::data_entry::DataEntry;
use crate::errors::DomainError;

/// Persistence for user-owned data entries
///
/// Mutations are scoped by owner: a row belonging to another user is treated
/// exactly like a missing row.
#[async_trait]
pub trait DataEntryRepository: Send + Sync {
    /// Entries owned by `user_id`, newest first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<DataEntry>, DomainError>;

    /// Every entry of every user, newest first
    async fn find_all(&self) -> Result<Vec<DataEntry>, DomainError>;

    /// Find an entry by ID regardless of owner
    async fn find_by_id(&self, id: Uuid) -> Result<Option<DataEntry>, DomainError>;

    async fn create(&self, entry: DataEntry) -> Result<DataEntry, DomainError>;

    /// Persist the editable fields of `entry` if it is owned by `entry.user_id`
    ///
    /// # Returns
    /// * `Ok(true)` - Row updated
    /// * `Ok(false)` - No row with that ID and owner
    async fn update(&self, entry: &DataEntry) -> Result<bool, DomainError>;

    /// Delete the entry if it is owned by `user_id`
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError>;
}
