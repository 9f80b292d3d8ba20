//! MySQL implementation of the TokenRepository trait.
//!
//! Current token state lives in `token_details`, keyed by `unique_id`. Tokens
//! are stored as issued so the equality lookups match byte for byte.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use tk_core::domain::entities::token::TokenDetails;
use tk_core::errors::DomainError;
use tk_core::repositories::TokenRepository;

const SELECT_COLUMNS: &str =
    "SELECT unique_id, access_token, refresh_token, created_at, updated_at FROM token_details";

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

    /// Convert database row to TokenDetails entity
    fn row_to_details(row: &sqlx::mysql::MySqlRow) -> Result<TokenDetails, DomainError> {
        Ok(TokenDetails {
            subject: row.try_get("unique_id")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get unique_id: {}", e) })?,
            access_token: row.try_get("access_token")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get access_token: {}", e) })?,
            refresh_token: row.try_get("refresh_token")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get refresh_token: {}", e) })?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get updated_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn upsert(
        &self,
        subject: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenDetails, DomainError> {
        let mut tx = self.pool.begin().await
            .map_err(|e| DomainError::Internal { message: format!("Failed to begin transaction: {}", e) })?;

        // The row lock taken here is held until commit, so the read below sees
        // this write and not a concurrent one
        let query = r#"
            INSERT INTO token_details (
                unique_id, access_token, refresh_token, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                access_token = VALUES(access_token),
                refresh_token = VALUES(refresh_token),
                updated_at = GREATEST(VALUES(updated_at), created_at)
        "#;

        let now = Utc::now();
        sqlx::query(query)
            .bind(subject)
            .bind(access_token)
            .bind(refresh_token)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to upsert token details: {}", e) })?;

        let row = sqlx::query(&format!("{} WHERE unique_id = ?", SELECT_COLUMNS))
            .bind(subject)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to read back token details: {}", e) })?;
        let details = Self::row_to_details(&row)?;

        tx.commit().await
            .map_err(|e| DomainError::Internal { message: format!("Failed to commit token details: {}", e) })?;

        Ok(details)
    }

    async fn replace_if_current(
        &self,
        subject: &str,
        expected_access_token: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Option<TokenDetails>, DomainError> {
        let mut tx = self.pool.begin().await
            .map_err(|e| DomainError::Internal { message: format!("Failed to begin transaction: {}", e) })?;

        // The WHERE clause is evaluated under the row lock; a concurrent
        // rotation that committed first leaves nothing to match
        let query = r#"
            UPDATE token_details
            SET access_token = ?,
                refresh_token = ?,
                updated_at = GREATEST(?, created_at)
            WHERE unique_id = ? AND access_token = ?
        "#;

        let result = sqlx::query(query)
            .bind(access_token)
            .bind(refresh_token)
            .bind(Utc::now())
            .bind(subject)
            .bind(expected_access_token)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to replace token details: {}", e) })?;

        if result.rows_affected() == 0 {
            tx.rollback().await
                .map_err(|e| DomainError::Internal { message: format!("Failed to roll back token details: {}", e) })?;
            return Ok(None);
        }

        let row = sqlx::query(&format!("{} WHERE unique_id = ?", SELECT_COLUMNS))
            .bind(subject)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to read back token details: {}", e) })?;
        let details = Self::row_to_details(&row)?;

        tx.commit().await
            .map_err(|e| DomainError::Internal { message: format!("Failed to commit token details: {}", e) })?;

        Ok(Some(details))
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<TokenDetails>, DomainError> {
        let result = sqlx::query(&format!("{} WHERE unique_id = ? LIMIT 1", SELECT_COLUMNS))
            .bind(subject)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to find token details: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_details(&row)?)),
            None => Ok(None),
        }
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1 FROM token_details LIMIT 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Token store health check failed: {}", e) })?;
        Ok(())
    }

    async fn find_by_subject_and_access_token(
        &self,
        subject: &str,
        access_token: &str,
    ) -> Result<Option<TokenDetails>, DomainError> {
        let result = sqlx::query(&format!(
            "{} WHERE unique_id = ? AND access_token = ? LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(subject)
        .bind(access_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Internal { message: format!("Failed to find token details by access token: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_details(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_subject_and_refresh_token(
        &self,
        subject: &str,
        refresh_token: &str,
    ) -> Result<Option<TokenDetails>, DomainError> {
        let result = sqlx::query(&format!(
            "{} WHERE unique_id = ? AND refresh_token = ? LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(subject)
        .bind(refresh_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Internal { message: format!("Failed to find token details by refresh token: {}", e) })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_details(&row)?)),
            None => Ok(None),
        }
    }
}
