//! MySQL implementation of the AuditLogRepository trait.
//!
//! The issuance history lives in `transac_token_details`. Rows are only ever
//! inserted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tk_core::domain::entities::audit::TokenAuditRecord;
use tk_core::errors::DomainError;
use tk_core::repositories::AuditLogRepository;

/// MySQL implementation of AuditLogRepository
pub struct MySqlAuditLogRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAuditLogRepository {
    /// Create a new MySQL audit log repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to TokenAuditRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<TokenAuditRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?;

        Ok(TokenAuditRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            subject: row.try_get("unique_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get unique_id: {}", e),
            })?,
            access_token: row.try_get("access_token").map_err(|e| DomainError::Internal {
                message: format!("Failed to get access_token: {}", e),
            })?,
            refresh_token: row.try_get("refresh_token").map_err(|e| DomainError::Internal {
                message: format!("Failed to get refresh_token: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn append(&self, record: &TokenAuditRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO transac_token_details (
                id, unique_id, access_token, refresh_token, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.subject)
            .bind(&record.access_token)
            .bind(&record.refresh_token)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to append audit record: {}", e),
            })?;

        Ok(())
    }

    async fn find_by_subject(
        &self,
        subject: &str,
        limit: usize,
    ) -> Result<Vec<TokenAuditRecord>, DomainError> {
        let query = r#"
            SELECT id, unique_id, access_token, refresh_token, created_at, updated_at
            FROM transac_token_details
            WHERE unique_id = ?
            ORDER BY created_at DESC
            LIMIT ?
        "#;

        let rows = sqlx::query(query)
            .bind(subject)
            .bind(u64::try_from(limit).unwrap_or(u64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find audit records: {}", e),
            })?;

        rows.iter().map(Self::row_to_record).collect()
    }
}
