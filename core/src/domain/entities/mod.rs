//! Domain entities representing token state and issuance history.

pub mod audit;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use audit::TokenAuditRecord;
pub use token::{Claims, TokenDetails, TokenPair};
