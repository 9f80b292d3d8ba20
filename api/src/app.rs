//! Application factory and server runner

use std::sync::Arc;

use actix_web::{error, middleware::Logger, web, App, HttpResponse, HttpServer};
use tracing::info;

use tk_core::repositories::{AuditLogRepository, TokenRepository};
use tk_core::services::audit::{AuditService, AuditServiceConfig};
use tk_core::services::token::{TokenLifecycleManager, TokenServiceConfig};
use tk_shared::config::AppConfig;
use tk_shared::errors::{error_codes, ErrorResponse};
use tk_shared::types::response::HealthResponse;

use crate::routes::jwt::{
    generate_token::generate_token, regenerate_tokens::regenerate_tokens,
    validate_refresh_token::validate_refresh_token, validate_token::validate_token, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<T, A>(
    app_state: web::Data<AppState<T, A>>,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    T: TokenRepository + 'static,
    A: AuditLogRepository + 'static,
{
    // Unparseable bodies get the same error shape as every other 400
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string()));
            error::InternalError::from_response(err, response).into()
        });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check::<T, A>))
        .service(
            web::scope("/api/v1").service(
                web::scope("/jwt")
                    .route("/generate-token", web::post().to(generate_token::<T, A>))
                    .route("/validate-token", web::post().to(validate_token::<T, A>))
                    .route(
                        "/validate-refresh-token",
                        web::post().to(validate_refresh_token::<T, A>),
                    )
                    .route("/regenerate-tokens", web::post().to(regenerate_tokens::<T, A>)),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Wire the manager over the given stores and serve until shutdown
pub async fn run<T, A>(config: &AppConfig, tokens: Arc<T>, audit: Arc<A>) -> std::io::Result<()>
where
    T: TokenRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let audit_service = AuditService::new(audit, AuditServiceConfig::from(&config.audit));
    let manager = TokenLifecycleManager::new(
        tokens,
        audit_service,
        TokenServiceConfig::from(&config.tokens),
    );
    let app_state = web::Data::new(AppState {
        manager: Arc::new(manager),
    });

    let bind_address = config.server.bind_address();
    let max_payload_size = config.server.max_payload_size;
    info!(address = %bind_address, "Server binding");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), max_payload_size))
        .bind(&bind_address)?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await
}

/// Health check endpoint handler
///
/// Reports `degraded` with 503 while the token store is unreachable.
async fn health_check<T, A>(state: web::Data<AppState<T, A>>) -> HttpResponse
where
    T: TokenRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let service = "tokenkeeper-api";
    let version = env!("CARGO_PKG_VERSION");

    if state.manager.store_healthy().await {
        HttpResponse::Ok().json(HealthResponse::healthy(service, version))
    } else {
        HttpResponse::ServiceUnavailable().json(HealthResponse::degraded(service, version))
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
