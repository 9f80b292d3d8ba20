//! # Tokenkeeper Core
//!
//! Core logic for issuing, validating and rotating signed session token pairs.
//! This crate contains the domain entities, the HS512 signer, the repository
//! contracts for current token state and the issuance audit trail, and the
//! `TokenLifecycleManager` that owns the token invariants.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, TokenAuditRecord, TokenDetails, TokenPair};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{
    AuditLogRepository, InMemoryAuditLogRepository, InMemoryTokenRepository,
    NoOpAuditLogRepository, TokenRepository,
};
pub use services::{
    AuditService, AuditServiceConfig, JwtSigner, TokenLifecycleManager, TokenServiceConfig,
};
