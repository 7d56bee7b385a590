//! Data entry entity: a user-owned record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner name shown when the owning user cannot be resolved
pub const UNKNOWN_OWNER: &str = "Unknown";

/// A record owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub value: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Owning user
    pub user_id: Uuid,
}

/// Client-supplied fields for create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntryInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub value: Decimal,
}

impl DataEntry {
    /// Creates a new entry owned by `user_id`
    pub fn new(user_id: Uuid, input: DataEntryInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            category: input.category,
            value: input.value,
            created_at: now,
            updated_at: now,
            user_id,
        }
    }

    /// Replaces the editable fields and bumps `updated_at`
    pub fn apply(&mut self, input: DataEntryInput) {
        self.title = input.title;
        self.description = input.description;
        self.category = input.category;
        self.value = input.value;
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// A data entry together with its owner's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntryView {
    #[serde(flatten)]
    pub entry: DataEntry,
    pub created_by: String,
}

impl DataEntryView {
    /// Falls back to [`UNKNOWN_OWNER`] when no name was resolved
    pub fn new(entry: DataEntry, owner_name: Option<String>) -> Self {
        Self {
            entry,
            created_by: owner_name.unwrap_or_else(|| UNKNOWN_OWNER.to_string()),
        }
    }
}
