//! Domain layer containing token and audit entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{Claims, TokenAuditRecord, TokenDetails, TokenPair};
