//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use eb_core::domain::entities::user::User;
use eb_core::errors::{AuthError, DomainError};
use eb_core::repositories::UserRepository;

use super::{db_error, parse_uuid};

const USER_COLUMNS: &str =
    "id, email, email_normalized, password_hash, first_name, last_name, created_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let get = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let id: String = row.try_get("id").map_err(|e| get("id", e))?;

        Ok(User {
            id: parse_uuid("users.id", &id)?,
            email: row.try_get("email").map_err(|e| get("email", e))?,
            email_normalized: row
                .try_get("email_normalized")
                .map_err(|e| get("email_normalized", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| get("password_hash", e))?,
            first_name: row.try_get("first_name").map_err(|e| get("first_name", e))?,
            last_name: row.try_get("last_name").map_err(|e| get("last_name", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get("created_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email_normalized: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE email_normalized = ? LIMIT 1",
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(email_normalized)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by email"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM users WHERE id IN (", USER_COLUMNS));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to find users by ids"))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn exists_by_email(&self, email_normalized: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email_normalized = ?) AS user_exists",
        )
        .bind(email_normalized)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to check user existence"))?;

        let exists: i64 = row
            .try_get("user_exists")
            .map_err(db_error("Failed to read existence result"))?;
        Ok(exists == 1)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, email_normalized, password_hash, first_name, last_name, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.email_normalized)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::info!("Concurrent registration hit the unique email index");
                Err(AuthError::UserAlreadyExists.into())
            }
            Err(e) => Err(db_error("Failed to create user")(e)),
        }
    }
}
