//! MySQL repository implementations

mod audit_repository_impl;
mod token_repository_impl;

pub use audit_repository_impl::MySqlAuditLogRepository;
pub use token_repository_impl::MySqlTokenRepository;
