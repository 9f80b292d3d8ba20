//! In-memory implementation of AuditLogRepository

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::audit::TokenAuditRecord;
use crate::errors::DomainError;

use super::AuditLogRepository;

/// Process-local issuance history
pub struct InMemoryAuditLogRepository {
    records: Arc<RwLock<Vec<TokenAuditRecord>>>,
    should_fail: Arc<AtomicBool>,
}

impl InMemoryAuditLogRepository {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent operation fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// All records in append order
    pub async fn get_all_records(&self) -> Vec<TokenAuditRecord> {
        self.records.read().await.clone()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Audit log unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryAuditLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn append(&self, record: &TokenAuditRecord) -> Result<(), DomainError> {
        self.check_available()?;

        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn find_by_subject(
        &self,
        subject: &str,
        limit: usize,
    ) -> Result<Vec<TokenAuditRecord>, DomainError> {
        self.check_available()?;

        let records = self.records.read().await;
        // Background writes can land out of order, so sort on the issue time.
        // Ties keep the later append first.
        let mut matching: Vec<TokenAuditRecord> = records
            .iter()
            .rev()
            .filter(|record| record.subject == subject)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit);
        Ok(matching)
    }
}
