use actix_web::{web, HttpResponse};
use validator::Validate;

use tk_core::repositories::{AuditLogRepository, TokenRepository};
use tk_shared::types::ApiResponse;

use crate::dto::{TokenValidationResponse, ValidateRefreshTokenRequest};
use crate::handlers::error_handler::unauthorized;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/jwt/validate-refresh-token
pub async fn validate_refresh_token<T, A>(
    state: web::Data<AppState<T, A>>,
    request: web::Json<ValidateRefreshTokenRequest>,
) -> HttpResponse
where
    T: TokenRepository + 'static,
    A: AuditLogRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .manager
        .validate_refresh_token(&request.unique_id, &request.secret_key, &request.refresh_token)
        .await
    {
        Ok(true) => HttpResponse::Ok().json(ApiResponse::success(
            "Refresh token is valid",
            TokenValidationResponse { valid: true },
        )),
        Ok(false) => unauthorized("Refresh token is invalid"),
        Err(error) => handle_domain_error(error),
    }
}
