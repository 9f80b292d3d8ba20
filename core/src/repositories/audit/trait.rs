//! Audit log repository trait defining the interface for issuance history.

use async_trait::async_trait;

use crate::domain::entities::audit::TokenAuditRecord;
use crate::errors::DomainError;

/// Repository trait for the append-only issuance history
///
/// Records are only ever inserted. Implementations must not update or delete
/// existing records.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append one issuance record
    ///
    /// # Returns
    /// * `Ok(())` on successful append
    /// * `Err(DomainError)` if the record could not be stored
    async fn append(&self, record: &TokenAuditRecord) -> Result<(), DomainError>;

    /// Find the issuance history of a subject
    ///
    /// # Arguments
    /// * `subject` - The subject to search for
    /// * `limit` - Maximum number of records to return
    ///
    /// # Returns
    /// * Records for the subject, ordered by created_at descending
    async fn find_by_subject(
        &self,
        subject: &str,
        limit: usize,
    ) -> Result<Vec<TokenAuditRecord>, DomainError>;
}
