//! Data entry service implementation

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use eb_shared::validation::{CATEGORY_MAX_LEN, DESCRIPTION_MAX_LEN, TITLE_MAX_LEN};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::data_entry::{DataEntry, DataEntryInput, DataEntryView};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{DataEntryRepository, UserRepository};

/// Service over user-owned data entries
///
/// Every personal operation takes the caller's user ID; an entry owned by
/// someone else is reported as not found.
pub struct DataEntryService<D, U>
where
    D: DataEntryRepository,
    U: UserRepository,
{
    entries: Arc<D>,
    users: Arc<U>,
}

impl<D, U> DataEntryService<D, U>
where
    D: DataEntryRepository,
    U: UserRepository,
{
    pub fn new(entries: Arc<D>, users: Arc<U>) -> Self {
        Self { entries, users }
    }

    /// The caller's entries, newest first
    pub async fn list_personal(&self, user_id: Uuid) -> DomainResult<Vec<DataEntryView>> {
        let entries = self.entries.find_by_user(user_id).await?;
        self.with_owner_names(entries).await
    }

    /// Every user's entries with resolved owner names
    pub async fn list_all(&self) -> DomainResult<Vec<DataEntryView>> {
        let entries = self.entries.find_all().await?;
        self.with_owner_names(entries).await
    }

    /// A single entry of the caller
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> DomainResult<DataEntryView> {
        let entry = self.find_owned(user_id, id).await?;
        let mut views = self.with_owner_names(vec![entry]).await?;
        views.pop().ok_or_else(DomainError::entry_not_found)
    }

    /// Create an entry owned by the caller
    pub async fn create(&self, user_id: Uuid, input: DataEntryInput) -> DomainResult<DataEntryView> {
        let input = validate_entry_input(input)?;
        let entry = self.entries.create(DataEntry::new(user_id, input)).await?;
        info!(entry_id = %entry.id, user_id = %user_id, "Data entry created");

        let mut views = self.with_owner_names(vec![entry]).await?;
        views.pop().ok_or_else(DomainError::entry_not_found)
    }

    /// Replace the editable fields of one of the caller's entries
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: DataEntryInput,
    ) -> DomainResult<DataEntryView> {
        let input = validate_entry_input(input)?;
        let mut entry = self.find_owned(user_id, id).await?;
        entry.apply(input);

        if !self.entries.update(&entry).await? {
            return Err(DomainError::entry_not_found());
        }
        info!(entry_id = %id, user_id = %user_id, "Data entry updated");

        let mut views = self.with_owner_names(vec![entry]).await?;
        views.pop().ok_or_else(DomainError::entry_not_found)
    }

    /// Delete one of the caller's entries
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> DomainResult<()> {
        if !self.entries.delete(user_id, id).await? {
            debug!(entry_id = %id, user_id = %user_id, "Delete matched no owned entry");
            return Err(DomainError::entry_not_found());
        }
        info!(entry_id = %id, user_id = %user_id, "Data entry deleted");
        Ok(())
    }

    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> DomainResult<DataEntry> {
        self.entries
            .find_by_id(id)
            .await?
            .filter(|entry| entry.is_owned_by(user_id))
            .ok_or_else(DomainError::entry_not_found)
    }

    async fn with_owner_names(&self, entries: Vec<DataEntry>) -> DomainResult<Vec<DataEntryView>> {
        let owner_ids: Vec<Uuid> = entries
            .iter()
            .map(|e| e.user_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let names: HashMap<Uuid, String> = if owner_ids.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_by_ids(&owner_ids)
                .await?
                .into_iter()
                .map(|u| (u.id, u.display_name()))
                .collect()
        };

        Ok(entries
            .into_iter()
            .map(|entry| {
                let owner = names.get(&entry.user_id).cloned();
                DataEntryView::new(entry, owner)
            })
            .collect())
    }
}

/// Decimal places kept for an entry value
pub const VALUE_SCALE: u32 = 2;

/// Largest accepted entry value, `9999999999999999.99`
pub fn max_entry_value() -> Decimal {
    Decimal::new(999_999_999_999_999_999, VALUE_SCALE)
}

/// Check an entry value and bring it to [`VALUE_SCALE`] decimal places
///
/// Values must lie in `0..=max_entry_value()` and carry no more significant
/// decimal places than the store keeps; `1.5` comes back as `1.50`.
pub fn normalize_entry_value(value: Decimal) -> Result<Decimal, ValidationError> {
    if (value.is_sign_negative() && !value.is_zero()) || value > max_entry_value() {
        return Err(ValidationError::OutOfRange {
            field: "value".to_string(),
            min: "0".to_string(),
            max: max_entry_value().to_string(),
        });
    }

    let mut value = value.normalize();
    if value.scale() > VALUE_SCALE {
        return Err(ValidationError::TooPrecise {
            field: "value".to_string(),
            max_scale: VALUE_SCALE,
        });
    }
    if value.is_zero() {
        value = Decimal::ZERO;
    }
    value.rescale(VALUE_SCALE);
    Ok(value)
}

/// Trim text fields and enforce field limits
///
/// Title and category are required, description is optional; the value goes
/// through [`normalize_entry_value`].
pub fn validate_entry_input(input: DataEntryInput) -> Result<DataEntryInput, ValidationError> {
    let title = input.title.trim().to_string();
    let description = input.description.trim().to_string();
    let category = input.category.trim().to_string();

    if title.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "title".to_string(),
        });
    }
    ValidationError::ensure_max_len("title", &title, TITLE_MAX_LEN)?;
    ValidationError::ensure_max_len("description", &description, DESCRIPTION_MAX_LEN)?;

    if category.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "category".to_string(),
        });
    }
    ValidationError::ensure_max_len("category", &category, CATEGORY_MAX_LEN)?;

    Ok(DataEntryInput {
        title,
        description,
        category,
        value: normalize_entry_value(input.value)?,
    })
}
