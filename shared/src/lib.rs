//! Shared utilities and common types for the Tokenkeeper server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered configuration loader
//! - Error response structures and error codes
//! - The API response envelope

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuditConfig, ConfigError, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    ServerConfig, StorageBackend, TokenConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use types::ApiResponse;
