//! Audit service for recording token issuances.
//!
//! Appends to the issuance history without ever failing the caller. Writes can
//! run on a background task so the history never slows issuance down.

use std::sync::Arc;
use tokio::task;
use tracing::{debug, warn};

use tk_shared::config::AuditConfig;

use crate::domain::entities::audit::TokenAuditRecord;
use crate::errors::DomainResult;
use crate::repositories::AuditLogRepository;

/// Configuration for the audit service
#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// Whether issuances are recorded at all
    pub enabled: bool,
    /// Whether to run audit writes asynchronously
    pub async_writes: bool,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            async_writes: true,
        }
    }
}

impl From<&AuditConfig> for AuditServiceConfig {
    fn from(config: &AuditConfig) -> Self {
        Self {
            enabled: config.enabled,
            async_writes: config.async_writes,
        }
    }
}

/// Service for the append-only issuance history
pub struct AuditService<R>
where
    R: AuditLogRepository,
{
    repository: Arc<R>,
    config: AuditServiceConfig,
}

impl<R> AuditService<R>
where
    R: AuditLogRepository + 'static,
{
    /// Create a new audit service
    pub fn new(repository: Arc<R>, config: AuditServiceConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &AuditServiceConfig {
        &self.config
    }

    /// Record one issuance
    ///
    /// Failures are logged and swallowed.
    pub async fn record_issuance(&self, subject: &str, access_token: &str, refresh_token: &str) {
        if !self.config.enabled {
            return;
        }

        let record = TokenAuditRecord::new(subject, access_token, refresh_token);

        if self.config.async_writes {
            let repository = Arc::clone(&self.repository);
            task::spawn(async move {
                write_record(repository.as_ref(), &record).await;
            });
        } else {
            write_record(self.repository.as_ref(), &record).await;
        }
    }

    /// Issuance history of a subject, newest first
    pub async fn history(&self, subject: &str, limit: usize) -> DomainResult<Vec<TokenAuditRecord>> {
        self.repository.find_by_subject(subject, limit).await
    }
}

async fn write_record<R: AuditLogRepository + ?Sized>(repository: &R, record: &TokenAuditRecord) {
    match repository.append(record).await {
        Ok(()) => debug!(subject = %record.subject, record_id = %record.id, "Issuance recorded"),
        Err(e) => warn!(
            subject = %record.subject,
            record_id = %record.id,
            error = %e,
            "Failed to write audit record"
        ),
    }
}
