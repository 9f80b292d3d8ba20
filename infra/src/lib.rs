//! # Infrastructure Layer
//!
//! Concrete persistence for the Tokenkeeper core:
//! - **Database**: MySQL connection pool and schema migrations using SQLx
//! - **Repositories**: `TokenRepository` over `token_details` and
//!   `AuditLogRepository` over `transac_token_details`
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
