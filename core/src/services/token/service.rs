//! Token lifecycle manager: issuance, validation and rotation

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, error, info, warn};

use crate::domain::entities::audit::TokenAuditRecord;
use crate::domain::entities::token::{Claims, TokenDetails, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{AuditLogRepository, TokenRepository};
use crate::services::audit::AuditService;

use super::config::TokenServiceConfig;
use super::signer::JwtSigner;

/// Owns the per-subject token invariants
///
/// The token repository holds the one current pair for each subject; a
/// presented token is accepted only while it is that pair's member and its
/// signature and expiry check out. Every successful issuance is also appended
/// to the audit history, which never affects any decision made here.
pub struct TokenLifecycleManager<T, A>
where
    T: TokenRepository,
    A: AuditLogRepository,
{
    repository: Arc<T>,
    audit: AuditService<A>,
    signer: JwtSigner,
    config: TokenServiceConfig,
}

impl<T, A> TokenLifecycleManager<T, A>
where
    T: TokenRepository,
    A: AuditLogRepository + 'static,
{
    /// Creates a manager over the given stores
    pub fn new(repository: Arc<T>, audit: AuditService<A>, config: TokenServiceConfig) -> Self {
        Self {
            repository,
            audit,
            signer: JwtSigner::new(),
            config,
        }
    }

    /// Default lifetimes for callers that don't choose their own
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a fresh pair for `subject` and makes it the current one
    ///
    /// Any pair issued earlier for the same subject stops validating once this
    /// returns.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - empty subject or secret, non-positive TTL
    /// * `IssuanceFailed` - signing or the store write failed; nothing was
    ///   recorded in that case
    pub async fn issue(
        &self,
        subject: &str,
        secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> DomainResult<TokenPair> {
        let pair = self.sign_pair(subject, secret, access_ttl, refresh_ttl)?;

        self.repository
            .upsert(subject, &pair.access_token, &pair.refresh_token)
            .await
            .map_err(|e| store_write_failed(subject, e))?;

        self.audit
            .record_issuance(subject, &pair.access_token, &pair.refresh_token)
            .await;

        info!(subject = %subject, "Token pair issued");
        Ok(pair)
    }

    /// Whether `access_token` is the subject's current, well-signed, unexpired
    /// access token
    ///
    /// Rejections come back as `Ok(false)`; store faults and bad input are
    /// errors. Use [`check_access_token`](Self::check_access_token) for the
    /// reason behind a rejection.
    pub async fn validate(
        &self,
        subject: &str,
        secret: &str,
        access_token: &str,
    ) -> DomainResult<bool> {
        accepted(self.check_access_token(subject, secret, access_token).await)
    }

    /// Checks an access token and returns its claims
    ///
    /// The store is consulted first: a token that is not on record fails with
    /// `NotCurrent` whatever its signature.
    pub async fn check_access_token(
        &self,
        subject: &str,
        secret: &str,
        access_token: &str,
    ) -> DomainResult<Claims> {
        require_present(subject, secret, access_token)?;

        let current = self
            .repository
            .find_by_subject_and_access_token(subject, access_token)
            .await?;
        self.verify_current(current, subject, secret, access_token)
    }

    /// Whether `refresh_token` is the subject's current, well-signed,
    /// unexpired refresh token
    pub async fn validate_refresh_token(
        &self,
        subject: &str,
        secret: &str,
        refresh_token: &str,
    ) -> DomainResult<bool> {
        accepted(self.check_refresh_token(subject, secret, refresh_token).await)
    }

    /// Checks a refresh token and returns its claims
    pub async fn check_refresh_token(
        &self,
        subject: &str,
        secret: &str,
        refresh_token: &str,
    ) -> DomainResult<Claims> {
        require_present(subject, secret, refresh_token)?;

        let current = self
            .repository
            .find_by_subject_and_refresh_token(subject, refresh_token)
            .await?;
        self.verify_current(current, subject, secret, refresh_token)
    }

    /// Rotates the subject's pair after checking the presented access token
    ///
    /// The presented token must pass the same checks as
    /// [`validate`](Self::validate), and the new pair replaces it only if it is
    /// still current at write time. Of several concurrent rotations presenting
    /// the same token exactly one succeeds. Rejections fail with
    /// `TokenExpiredOrInvalid` and leave the stored pair untouched.
    pub async fn regenerate(
        &self,
        subject: &str,
        secret: &str,
        access_token: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> DomainResult<TokenPair> {
        match self.check_access_token(subject, secret, access_token).await {
            Ok(_) => {}
            Err(e) if e.is_unauthorized() => {
                warn!(subject = %subject, reason = %e, "Token regeneration rejected");
                return Err(TokenError::TokenExpiredOrInvalid.into());
            }
            Err(e) => return Err(e),
        }

        let pair = self.sign_pair(subject, secret, access_ttl, refresh_ttl)?;

        let replaced = self
            .repository
            .replace_if_current(subject, access_token, &pair.access_token, &pair.refresh_token)
            .await
            .map_err(|e| store_write_failed(subject, e))?;
        if replaced.is_none() {
            warn!(subject = %subject, "Token regeneration lost to a concurrent rotation");
            return Err(TokenError::TokenExpiredOrInvalid.into());
        }

        self.audit
            .record_issuance(subject, &pair.access_token, &pair.refresh_token)
            .await;

        info!(subject = %subject, "Token pair regenerated");
        Ok(pair)
    }

    /// The pair currently on record for `subject`
    pub async fn current_state(&self, subject: &str) -> DomainResult<Option<TokenDetails>> {
        self.repository.find_by_subject(subject).await
    }

    /// Whether the token store is reachable
    pub async fn store_healthy(&self) -> bool {
        match self.repository.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Token store health check failed");
                false
            }
        }
    }

    /// Issuance history of `subject`, newest first
    pub async fn issuance_history(
        &self,
        subject: &str,
        limit: usize,
    ) -> DomainResult<Vec<TokenAuditRecord>> {
        self.audit.history(subject, limit).await
    }

    fn sign_pair(
        &self,
        subject: &str,
        secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> DomainResult<TokenPair> {
        let access_token = self.sign(subject, secret, access_ttl)?;
        let refresh_token = self.sign(subject, secret, refresh_ttl)?;
        Ok(TokenPair::new(access_token, refresh_token))
    }

    fn sign(&self, subject: &str, secret: &str, ttl: Duration) -> DomainResult<String> {
        self.signer.issue(subject, secret, ttl).map_err(|e| {
            if !matches!(e, TokenError::InvalidInput { .. }) {
                error!(subject = %subject, error = %e, "Failed to sign token");
            }
            DomainError::from(e)
        })
    }

    fn verify_current(
        &self,
        current: Option<TokenDetails>,
        subject: &str,
        secret: &str,
        token: &str,
    ) -> DomainResult<Claims> {
        if current.is_none() {
            debug!(subject = %subject, "Presented token is not on record");
            return Err(TokenError::NotCurrent.into());
        }

        self.signer.verify(token, secret).map_err(|e| {
            debug!(subject = %subject, reason = %e, "Token verification failed");
            DomainError::from(e)
        })
    }
}

fn store_write_failed(subject: &str, e: DomainError) -> DomainError {
    error!(subject = %subject, error = %e, "Failed to persist token pair");
    TokenError::IssuanceFailed {
        reason: "token store write failed".to_string(),
    }
    .into()
}

fn require_present(subject: &str, secret: &str, token: &str) -> Result<(), TokenError> {
    if subject.is_empty() {
        return Err(TokenError::invalid_input("subject"));
    }
    if secret.is_empty() {
        return Err(TokenError::invalid_input("secret"));
    }
    if token.is_empty() {
        return Err(TokenError::invalid_input("token"));
    }
    Ok(())
}

fn accepted(result: DomainResult<Claims>) -> DomainResult<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if e.is_unauthorized() => Ok(false),
        Err(e) => Err(e),
    }
}
