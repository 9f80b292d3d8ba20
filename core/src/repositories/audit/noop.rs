//! No-op implementation of AuditLogRepository for when the history is disabled

use async_trait::async_trait;

use crate::domain::entities::audit::TokenAuditRecord;
use crate::errors::DomainError;
use super::AuditLogRepository;

/// Discards every record and reports an empty history
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAuditLogRepository;

impl NoOpAuditLogRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditLogRepository for NoOpAuditLogRepository {
    async fn append(&self, _record: &TokenAuditRecord) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_by_subject(
        &self,
        _subject: &str,
        _limit: usize,
    ) -> Result<Vec<TokenAuditRecord>, DomainError> {
        Ok(Vec::new())
    }
}
