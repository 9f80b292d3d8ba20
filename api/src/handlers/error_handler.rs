//! Mapping of domain errors to HTTP responses
//!
//! Rejected credentials are 401, malformed requests 400, and faults on our
//! side 500. Server faults never expose their internal message.

use actix_web::{http::StatusCode, HttpResponse};
use tracing::{error, warn};
use validator::ValidationErrors;

use tk_core::errors::DomainError;
use tk_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

/// Status code for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    if error.is_unauthorized() {
        StatusCode::UNAUTHORIZED
    } else if error.is_bad_request() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let status = status_for(&error);
    if status.is_server_error() {
        error!(code = error.code(), error = %error, "Request failed");
    } else {
        warn!(code = error.code(), error = %error, "Request rejected");
    }

    HttpResponse::build(status).json(error.to_error_response())
}

/// 400 response listing the offending fields
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }

    warn!(details = ?response.details, "Request validation failed");
    HttpResponse::BadRequest().json(response)
}

/// 401 response for a credential that did not validate
pub fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(error_codes::UNAUTHORIZED, message))
}
