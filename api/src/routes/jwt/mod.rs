//! Token route handlers
//!
//! - `generate-token` - issue a pair for a subject
//! - `validate-token` - check an access token
//! - `validate-refresh-token` - check a refresh token
//! - `regenerate-tokens` - rotate the pair after checking an access token

pub mod generate_token;
pub mod regenerate_tokens;
pub mod validate_refresh_token;
pub mod validate_token;

use std::sync::Arc;

use chrono::Duration;

use tk_core::repositories::{AuditLogRepository, TokenRepository};
use tk_core::services::token::TokenLifecycleManager;

/// Application state that holds shared services
pub struct AppState<T, A>
where
    T: TokenRepository,
    A: AuditLogRepository,
{
    pub manager: Arc<TokenLifecycleManager<T, A>>,
}

/// Requested lifetime in milliseconds, or the configured default
pub(crate) fn ttl_or(requested_ms: Option<i64>, default: Duration) -> Duration {
    requested_ms.map(Duration::milliseconds).unwrap_or(default)
}
