//! Token service module
//!
//! - `JwtSigner` - HS512 signing and verification with a per-call secret
//! - `TokenLifecycleManager` - issuance, validation and rotation against the
//!   current-state store
//! - `TokenServiceConfig` - default token lifetimes

mod config;
mod service;
mod signer;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenLifecycleManager;
pub use signer::JwtSigner;
