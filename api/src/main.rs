use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use tk_api::{run, telemetry};
use tk_core::repositories::{
    AuditLogRepository, InMemoryAuditLogRepository, InMemoryTokenRepository,
    NoOpAuditLogRepository, TokenRepository,
};
use tk_infra::database::MySqlStores;
use tk_shared::config::{AppConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        backend = ?config.database.backend,
        "Starting Tokenkeeper API server"
    );

    match config.database.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; token state is lost on restart");
            serve(
                &config,
                Arc::new(InMemoryTokenRepository::new()),
                Arc::new(InMemoryAuditLogRepository::new()),
            )
            .await
        }
        StorageBackend::MySql => {
            let stores = MySqlStores::connect(config.database.clone())
                .await
                .context("failed to connect to MySQL")?;
            let result = serve(&config, Arc::clone(&stores.tokens), Arc::clone(&stores.audit)).await;
            stores.pool.close().await;
            result
        }
    }
}

async fn serve<T, A>(config: &AppConfig, tokens: Arc<T>, audit: Arc<A>) -> anyhow::Result<()>
where
    T: TokenRepository + 'static,
    A: AuditLogRepository + 'static,
{
    if config.audit.enabled {
        run(config, tokens, audit).await?;
    } else {
        info!("Issuance audit trail disabled");
        run(config, tokens, Arc::new(NoOpAuditLogRepository::new())).await?;
    }

    info!("Server stopped");
    Ok(())
}
