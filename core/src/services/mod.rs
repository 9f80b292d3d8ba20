//! Business services containing domain logic and use cases.

pub mod audit;
pub mod token;

pub use audit::{AuditService, AuditServiceConfig};
pub use token::{JwtSigner, TokenLifecycleManager, TokenServiceConfig};
