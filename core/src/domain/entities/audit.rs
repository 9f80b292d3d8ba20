//! Audit record entity for the issuance history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One issuance event
///
/// Records are append-only: each issuance produces a new record and existing
/// records are never updated or deleted. The history is informational and is
/// never consulted when validating a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAuditRecord {
    /// Unique identifier for this record
    pub id: Uuid,

    /// Subject the pair was issued for
    pub subject: String,

    /// Issued access token
    pub access_token: String,

    /// Issued refresh token
    pub refresh_token: String,

    /// Time of issuance
    pub created_at: DateTime<Utc>,

    /// Same as `created_at`; kept so the history mirrors the current-state shape
    pub updated_at: DateTime<Utc>,
}

impl TokenAuditRecord {
    /// Creates a record for an issuance happening now
    pub fn new(
        subject: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
