//! MySQL implementation of the TokenRepository trait.
//!
//! Rows are keyed by the SHA-256 digest computed in the token service; this
//! layer never sees plaintext tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use eb_core::domain::entities::token::RefreshToken;
use eb_core::errors::DomainError;
use eb_core::repositories::TokenRepository;

use super::{db_error, parse_uuid};

const INSERT_TOKEN: &str = r#"
    INSERT INTO refresh_tokens (
        id, user_id, token_hash, created_at, expires_at, is_revoked
    ) VALUES (?, ?, ?, ?, ?, ?)
"#;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let get = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let id: String = row.try_get("id").map_err(|e| get("id", e))?;
        let user_id: String = row.try_get("user_id").map_err(|e| get("user_id", e))?;

        Ok(RefreshToken {
            id: parse_uuid("refresh_tokens.id", &id)?,
            user_id: parse_uuid("refresh_tokens.user_id", &user_id)?,
            token_hash: row.try_get("token_hash").map_err(|e| get("token_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| get("expires_at", e))?,
            is_revoked: row.try_get("is_revoked").map_err(|e| get("is_revoked", e))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        sqlx::query(INSERT_TOKEN)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token_hash)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.is_revoked)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to save refresh token"))?;

        Ok(token)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, created_at, expires_at, is_revoked
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find refresh token"))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn rotate_refresh_token(
        &self,
        presented_hash: &str,
        replacement: RefreshToken,
    ) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin rotation transaction"))?;

        // Compare-and-swap: only an active row can be revoked, and the row lock
        // serializes concurrent rotations of the same token.
        let revoked = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token_hash = ? AND is_revoked = FALSE AND expires_at >= ?
            "#,
        )
        .bind(presented_hash)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to revoke presented refresh token"))?;

        if revoked.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(db_error("Failed to roll back rotation"))?;
            return Ok(false);
        }

        sqlx::query(INSERT_TOKEN)
            .bind(replacement.id.to_string())
            .bind(replacement.user_id.to_string())
            .bind(&replacement.token_hash)
            .bind(replacement.created_at)
            .bind(replacement.expires_at)
            .bind(replacement.is_revoked)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to insert replacement refresh token"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit rotation"))?;

        Ok(true)
    }

    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token_hash = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to revoke token"))?;

        Ok(result.rows_affected() > 0)
    }
}
