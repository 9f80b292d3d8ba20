//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `tokens` - Token lifetimes and audit trail behaviour
//! - `database` - Storage backend selection and MySQL pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod database;
pub mod environment;
pub mod server;
pub mod tokens;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use database::{DatabaseConfig, StorageBackend};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use tokens::{AuditConfig, TokenConfig};

/// Prefix for environment variable overrides, e.g. `TK__SERVER__PORT=9090`
pub const ENV_PREFIX: &str = "TK";

/// Errors raised while assembling the application configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Storage configuration
    pub database: DatabaseConfig,

    /// Token lifetime defaults
    pub tokens: TokenConfig,

    /// Audit trail configuration
    pub audit: AuditConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            tokens: TokenConfig::default(),
            audit: AuditConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration for the current environment
    ///
    /// Sources, lowest precedence first:
    /// 1. built-in defaults
    /// 2. `config/<environment>.toml` (optional)
    /// 3. `TK__`-prefixed environment variables (after `.env` is loaded)
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();

        let settings = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", environment.config_name()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;
        app_config.environment = environment;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject configurations that cannot serve requests
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tokens.validate()?;
        if self.database.backend == StorageBackend::MySql && self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "database.url is required for the mysql backend".to_string(),
            });
        }
        Ok(())
    }
}
