//! Audit service module for recording token issuance history.

mod service;

pub use service::{AuditService, AuditServiceConfig};
