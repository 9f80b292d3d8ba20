use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use tk_core::repositories::{AuditLogRepository, TokenRepository};
use tk_shared::types::ApiResponse;

use crate::dto::RegenerateTokensRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::{ttl_or, AppState};

/// Handler for POST /api/v1/jwt/regenerate-tokens
///
/// Checks the presented access token and, if it is current and valid,
/// replaces the subject's pair with a new one.
///
/// ## Errors
/// - 400 Bad Request: Empty fields or non-positive lifetimes
/// - 401 Unauthorized: `TOKEN_EXPIRED_OR_INVALID`; the stored pair is unchanged
/// - 500 Internal Server Error: Store or signing fault
pub async fn regenerate_tokens<T, A>(
    state: web::Data<AppState<T, A>>,
    request: web::Json<RegenerateTokensRequest>,
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
        .regenerate(
            &request.unique_id,
            &request.secret_key,
            &request.access_token,
            access_ttl,
            refresh_ttl,
        )
        .await
    {
        Ok(pair) => {
            info!(subject = %request.unique_id, "Token regeneration request served");
            HttpResponse::Ok().json(ApiResponse::success("Tokens are regenerated", pair))
        }
        Err(error) => handle_domain_error(error),
    }
}
