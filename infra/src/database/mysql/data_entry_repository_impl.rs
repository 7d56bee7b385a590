//! MySQL implementation of the DataEntryRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use eb_core::domain::entities::data_entry::DataEntry;
use eb_core::errors::DomainError;
use eb_core::repositories::DataEntryRepository;

use super::{db_error, parse_uuid};

const ENTRY_COLUMNS: &str =
    "id, user_id, title, description, category, value, created_at, updated_at";

/// MySQL implementation of DataEntryRepository
pub struct MySqlDataEntryRepository {
    pool: MySqlPool,
}

impl MySqlDataEntryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &sqlx::mysql::MySqlRow) -> Result<DataEntry, DomainError> {
        let get = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let id: String = row.try_get("id").map_err(|e| get("id", e))?;
        let user_id: String = row.try_get("user_id").map_err(|e| get("user_id", e))?;

        Ok(DataEntry {
            id: parse_uuid("data_entries.id", &id)?,
            user_id: parse_uuid("data_entries.user_id", &user_id)?,
            title: row.try_get("title").map_err(|e| get("title", e))?,
            description: row.try_get("description").map_err(|e| get("description", e))?,
            category: row.try_get("category").map_err(|e| get("category", e))?,
            value: row
                .try_get::<Decimal, _>("value")
                .map_err(|e| get("value", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| get("updated_at", e))?,
        })
    }
}

#[async_trait]
impl DataEntryRepository for MySqlDataEntryRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<DataEntry>, DomainError> {
        let query = format!(
            "SELECT {} FROM data_entries WHERE user_id = ? ORDER BY created_at DESC",
            ENTRY_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list user entries"))?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    async fn find_all(&self) -> Result<Vec<DataEntry>, DomainError> {
        let query = format!(
            "SELECT {} FROM data_entries ORDER BY created_at DESC",
            ENTRY_COLUMNS
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list entries"))?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DataEntry>, DomainError> {
        let query = format!("SELECT {} FROM data_entries WHERE id = ? LIMIT 1", ENTRY_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find entry"))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn create(&self, entry: DataEntry) -> Result<DataEntry, DomainError> {
        let query = r#"
            INSERT INTO data_entries (
                id, user_id, title, description, category, value, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(entry.id.to_string())
            .bind(entry.user_id.to_string())
            .bind(&entry.title)
            .bind(&entry.description)
            .bind(&entry.category)
            .bind(entry.value)
            .bind(entry.created_at)
            .bind(entry.updated_at)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to create entry"))?;

        Ok(entry)
    }

    async fn update(&self, entry: &DataEntry) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE data_entries
            SET title = ?, description = ?, category = ?, value = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&entry.title)
            .bind(&entry.description)
            .bind(&entry.category)
            .bind(entry.value)
            .bind(entry.updated_at)
            .bind(entry.id.to_string())
            .bind(entry.user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update entry"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM data_entries WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete entry"))?;

        Ok(result.rows_affected() > 0)
    }
}
