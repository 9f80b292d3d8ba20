//! Token entities for signed session credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried inside a signed token
///
/// These are never persisted on their own; they are recovered by verifying
/// the compact token string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal the token was issued for
    pub subject: String,

    /// Issue time (second precision)
    pub issued_at: DateTime<Utc>,

    /// Expiry time (millisecond precision)
    pub expires_at: DateTime<Utc>,
}

impl Claims {
    /// Checks whether the claims have expired at `now`
    ///
    /// A token is expired from the instant `now >= expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Access/refresh token pair returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived credential for immediate requests
    pub access_token: String,

    /// Longer-lived credential
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

/// Current token state for a subject
///
/// Exactly one of these exists per subject. It is created on first issuance
/// and updated in place on every reissue or rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetails {
    /// Subject identifier (natural key)
    pub subject: String,

    /// Access token currently on record
    pub access_token: String,

    /// Refresh token currently on record
    pub refresh_token: String,

    /// First issuance for this subject
    pub created_at: DateTime<Utc>,

    /// Most recent issuance for this subject
    pub updated_at: DateTime<Utc>,
}

impl TokenDetails {
    /// Creates the first record for a subject
    pub fn new(
        subject: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            subject: subject.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Installs a newly issued pair, keeping `created_at`
    ///
    /// `updated_at` never moves behind `created_at`, even if the clock stepped
    /// backwards between issuances.
    pub fn reissue(
        &mut self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.access_token = access_token.into();
        self.refresh_token = refresh_token.into();
        self.updated_at = now.max(self.created_at);
    }

    /// Whether `token` is the access token on record
    pub fn holds_access_token(&self, token: &str) -> bool {
        self.access_token == token
    }

    /// Whether `token` is the refresh token on record
    pub fn holds_refresh_token(&self, token: &str) -> bool {
        self.refresh_token == token
    }

    /// The pair currently on record
    pub fn token_pair(&self) -> TokenPair {
        TokenPair::new(self.access_token.clone(), self.refresh_token.clone())
    }
}
