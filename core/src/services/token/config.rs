//! Configuration for the token lifecycle manager

use chrono::Duration;
use tk_shared::config::TokenConfig;

/// Default lifetimes applied when a caller does not choose its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::days(7),
        }
    }
}

impl From<&TokenConfig> for TokenServiceConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            access_token_ttl: Duration::milliseconds(config.access_token_ttl_ms),
            refresh_token_ttl: Duration::milliseconds(config.refresh_token_ttl_ms),
        }
    }
}
