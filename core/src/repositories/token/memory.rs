//! In-memory implementation of TokenRepository

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::entities::token::TokenDetails;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Process-local token repository
///
/// Used when no database is configured and as the test double for the
/// lifecycle manager. Rows live in a sharded map; every read-modify-write goes
/// through one entry guard, so writes are atomic per subject and subjects in
/// different shards never wait on each other.
pub struct InMemoryTokenRepository {
    rows: Arc<DashMap<String, TokenDetails>>,
    should_fail: Arc<AtomicBool>,
}

impl InMemoryTokenRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            rows: Arc::new(DashMap::new()),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent operation fail, to exercise fault paths
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of subjects with a current state
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no token was ever issued
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Token store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn upsert(
        &self,
        subject: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenDetails, DomainError> {
        self.check_available()?;

        let now = Utc::now();
        let details = self
            .rows
            .entry(subject.to_string())
            .and_modify(|existing| existing.reissue(access_token, refresh_token, now))
            .or_insert_with(|| TokenDetails::new(subject, access_token, refresh_token, now));

        Ok(details.clone())
    }

    async fn replace_if_current(
        &self,
        subject: &str,
        expected_access_token: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Option<TokenDetails>, DomainError> {
        self.check_available()?;

        match self.rows.entry(subject.to_string()) {
            Entry::Occupied(mut entry) if entry.get().holds_access_token(expected_access_token) => {
                entry
                    .get_mut()
                    .reissue(access_token, refresh_token, Utc::now());
                Ok(Some(entry.get().clone()))
            }
            _ => Ok(None),
        }
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<TokenDetails>, DomainError> {
        self.check_available()?;

        Ok(self.rows.get(subject).map(|details| details.value().clone()))
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        self.check_available()
    }
}
