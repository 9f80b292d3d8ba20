//! Token repository trait defining the interface for current token state.

use async_trait::async_trait;

use crate::domain::entities::token::TokenDetails;
use crate::errors::DomainError;

/// Repository trait for the current token state of each subject
///
/// Implementations hold at most one `TokenDetails` per subject and are the
/// source of truth for validation: a token is only accepted while it is the
/// one on record here.
///
/// # Concurrency
/// `upsert` must be atomic per subject. Two concurrent upserts for the same
/// subject must leave exactly one row holding one of the two pairs, never two
/// rows and never a mix of both pairs. Calls for different subjects must not
/// contend. `replace_if_current` compares and writes as one step, so of two
/// racing rotations from the same pair at most one succeeds.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Install a pair as the subject's current state
    ///
    /// Updates the existing row in place (`updated_at = now`, `created_at`
    /// preserved) or inserts a new row with `created_at = updated_at = now`.
    ///
    /// # Returns
    /// * `Ok(TokenDetails)` - The row as stored after the write
    /// * `Err(DomainError)` - The write failed; nothing was changed
    async fn upsert(
        &self,
        subject: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenDetails, DomainError>;

    /// Install a new pair only while `expected_access_token` is still current
    ///
    /// # Returns
    /// * `Ok(Some(TokenDetails))` - The row after the write
    /// * `Ok(None)` - The subject has no row or holds another access token;
    ///   nothing was changed
    /// * `Err(DomainError)` - Storage error occurred
    async fn replace_if_current(
        &self,
        subject: &str,
        expected_access_token: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Option<TokenDetails>, DomainError>;

    /// Find the current state for a subject
    ///
    /// # Returns
    /// * `Ok(Some(TokenDetails))` - Row found
    /// * `Ok(None)` - Nothing was ever issued for this subject
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_subject(&self, subject: &str) -> Result<Option<TokenDetails>, DomainError>;

    /// Check that the store can serve requests
    async fn health_check(&self) -> Result<(), DomainError>;

    /// Find the current state only if `access_token` is the one on record
    ///
    /// Returns `Ok(None)` for superseded, rotated or forged tokens.
    async fn find_by_subject_and_access_token(
        &self,
        subject: &str,
        access_token: &str,
    ) -> Result<Option<TokenDetails>, DomainError> {
        Ok(self
            .find_by_subject(subject)
            .await?
            .filter(|details| details.holds_access_token(access_token)))
    }

    /// Find the current state only if `refresh_token` is the one on record
    async fn find_by_subject_and_refresh_token(
        &self,
        subject: &str,
        refresh_token: &str,
    ) -> Result<Option<TokenDetails>, DomainError> {
        Ok(self
            .find_by_subject(subject)
            .await?
            .filter(|details| details.holds_refresh_token(refresh_token)))
    }
}
