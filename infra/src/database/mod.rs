//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and schema migrations
//! - Repository implementations for token state and the audit trail

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tk_shared::config::DatabaseConfig;

use crate::InfrastructureError;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlAuditLogRepository, MySqlTokenRepository};

/// MySQL-backed repositories sharing one pool
pub struct MySqlStores {
    pub pool: DatabasePool,
    pub tokens: Arc<MySqlTokenRepository>,
    pub audit: Arc<MySqlAuditLogRepository>,
}

impl MySqlStores {
    /// Connect, bring the schema up to date and build both repositories
    pub async fn connect(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let pool = DatabasePool::new(config).await?;
        pool.run_migrations().await?;

        let tokens = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));
        let audit = Arc::new(MySqlAuditLogRepository::new(pool.get_pool().clone()));

        Ok(Self {
            pool,
            tokens,
            audit,
        })
    }
}
