use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use tk_core::repositories::{AuditLogRepository, TokenRepository};
use tk_shared::types::ApiResponse;

use crate::dto::GenerateTokenRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::{ttl_or, AppState};

/// Handler for POST /api/v1/jwt/generate-token
///
/// Issues a new pair and makes it the subject's current one.
///
/// # Request Body
///
/// ```json
/// {
///     "uniqueId": "u1",
///     "secretKey": "s3cr3t",
///     "accessTokenTime": 900000,
///     "refreshTokenTime": 604800000
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Tokens are generated",
///     "data": { "accessToken": "eyJ...", "refreshToken": "eyJ..." },
///     "timestamp": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Empty fields or non-positive lifetimes
/// - 500 Internal Server Error: Signing or persistence failed
pub async fn generate_token<T, A>(
    state: web::Data<AppState<T, A>>,
    request: web::Json<GenerateTokenRequest>,
) -> HttpResponse
where
    T: TokenRepository + 'static,
    A: AuditLogRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let manager = &state.manager;
    let access_ttl = ttl_or(request.access_token_time, manager.config().access_token_ttl);
    let refresh_ttl = ttl_or(request.refresh_token_time, manager.config().refresh_token_ttl);

    match manager
        .issue(&request.unique_id, &request.secret_key, access_ttl, refresh_ttl)
        .await
    {
        Ok(pair) => {
            info!(subject = %request.unique_id, "Token generation request served");
            HttpResponse::Ok().json(ApiResponse::success("Tokens are generated", pair))
        }
        Err(error) => handle_domain_error(error),
    }
}
