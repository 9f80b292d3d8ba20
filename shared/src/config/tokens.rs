//! Token lifetime and audit trail configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Default token lifetimes, applied when a request does not carry its own
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Access token lifetime in milliseconds
    #[serde(default = "default_access_ttl_ms")]
    pub access_token_ttl_ms: i64,

    /// Refresh token lifetime in milliseconds
    #[serde(default = "default_refresh_ttl_ms")]
    pub refresh_token_ttl_ms: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_ms: default_access_ttl_ms(),
            refresh_token_ttl_ms: default_refresh_ttl_ms(),
        }
    }
}

impl TokenConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_ttl_ms <= 0 || self.refresh_token_ttl_ms <= 0 {
            return Err(ConfigError::Invalid {
                message: "token lifetimes must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Record every issuance in the append-only history
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Write audit records on a background task
    #[serde(default = "default_async_writes")]
    pub async_writes: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            async_writes: default_async_writes(),
        }
    }
}

fn default_access_ttl_ms() -> i64 {
    15 * 60 * 1000 // 15 minutes
}

fn default_refresh_ttl_ms() -> i64 {
    7 * 24 * 60 * 60 * 1000 // 7 days
}

fn default_enabled() -> bool {
    true
}

fn default_async_writes() -> bool {
    true
}
