//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::TokenError;

use thiserror::Error;
use tk_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Persistence or other infrastructure fault
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Presented credential rejected; callers answer with "unauthorized"
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DomainError::Token(token_error) if token_error.is_unauthorized())
    }

    /// Fault on our side; callers answer with "server error"
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            DomainError::Internal { .. } | DomainError::Token(TokenError::IssuanceFailed { .. })
        )
    }

    /// Request shape was wrong (empty secret, non-positive TTL, ...)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            DomainError::Validation { .. } | DomainError::Token(TokenError::InvalidInput { .. })
        )
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Token(token_error) => token_error.code(),
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        // Internal details stay in the logs
        let message = if self.is_server_fault() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };
        ErrorResponse::new(self.code(), message)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
