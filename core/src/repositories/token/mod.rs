//! Token repository module.

mod r#trait;
pub use r#trait::TokenRepository;

mod memory;
pub use memory::InMemoryTokenRepository;
