//! Repository contracts for token persistence.
//!
//! - `token` - current token state, one row per subject
//! - `audit` - append-only issuance history

pub mod audit;
pub mod token;

pub use audit::{AuditLogRepository, InMemoryAuditLogRepository, NoOpAuditLogRepository};
pub use token::{InMemoryTokenRepository, TokenRepository};
