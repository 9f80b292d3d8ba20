use actix_web::{web, HttpResponse};
use validator::Validate;

use tk_core::repositories::{AuditLogRepository, TokenRepository};
use tk_shared::types::ApiResponse;

use crate::dto::{TokenValidationResponse, ValidateTokenRequest};
use crate::handlers::error_handler::unauthorized;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/jwt/validate-token
///
/// 200 when the access token is the subject's current one and verifies, 401
/// otherwise. The reason for a rejection is not disclosed.
pub async fn validate_token<T, A>(
    state: web::Data<AppState<T, A>>,
    request: web::Json<ValidateTokenRequest>,
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
        .validate(&request.unique_id, &request.secret_key, &request.access_token)
        .await
    {
        Ok(true) => HttpResponse::Ok().json(ApiResponse::success(
            "Access token is valid",
            TokenValidationResponse { valid: true },
        )),
        Ok(false) => unauthorized("Access token is invalid"),
        Err(error) => handle_domain_error(error),
    }
}
