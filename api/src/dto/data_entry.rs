use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use eb_core::domain::entities::{DataEntryInput, DataEntryView};
use eb_core::services::data_entry::normalize_entry_value;

/// Body of `POST /api/dataentries` and `PUT /api/dataentries/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DataEntryRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required (max 200 characters)"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description is limited to 1000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "Category is required (max 100 characters)"))]
    pub category: String,

    /// Accepted as a JSON number or a decimal string
    #[validate(custom(
        function = "entry_value",
        message = "Value must be between 0 and 9999999999999999.99 with at most 2 decimal places"
    ))]
    pub value: Decimal,
}

fn entry_value(value: &Decimal) -> Result<(), validator::ValidationError> {
    normalize_entry_value(*value)
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("range"))
}

impl From<DataEntryRequest> for DataEntryInput {
    fn from(request: DataEntryRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            category: request.category,
            value: request.value,
        }
    }
}

/// A data entry as returned to clients; `value` is a decimal string with two places
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEntryResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub value: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    /// Owner's display name
    pub created_by: String,
}

impl From<DataEntryView> for DataEntryResponse {
    fn from(view: DataEntryView) -> Self {
        let entry = view.entry;
        Self {
            id: entry.id,
            title: entry.title,
            description: entry.description,
            category: entry.category,
            value: entry.value,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
            user_id: entry.user_id,
            created_by: view.created_by,
        }
    }
}
