//! Token error taxonomy
//!
//! Every failure the signer or the lifecycle manager can report about a
//! presented or requested token. Low-level `jsonwebtoken` errors are converted
//! into these variants at the signer boundary and never escape raw.

use thiserror::Error;

use tk_shared::errors::error_codes;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token could not be parsed")]
    Malformed,

    #[error("Token signature verification failed")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,

    #[error("Token is not the one currently on record")]
    NotCurrent,

    #[error("Token issuance failed: {reason}")]
    IssuanceFailed { reason: String },

    #[error("Token expired or invalid")]
    TokenExpiredOrInvalid,

    #[error("Invalid input: {field}")]
    InvalidInput { field: String },
}

impl TokenError {
    pub(crate) fn invalid_input(field: &str) -> Self {
        TokenError::InvalidInput {
            field: field.to_string(),
        }
    }

    /// Whether the presented credential was rejected, as opposed to a fault
    /// in issuance or a bad request shape
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            TokenError::Malformed
                | TokenError::SignatureInvalid
                | TokenError::Expired
                | TokenError::NotCurrent
                | TokenError::TokenExpiredOrInvalid
        )
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Malformed => error_codes::TOKEN_MALFORMED,
            TokenError::SignatureInvalid => error_codes::TOKEN_SIGNATURE_INVALID,
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::NotCurrent => error_codes::TOKEN_NOT_CURRENT,
            TokenError::IssuanceFailed { .. } => error_codes::ISSUANCE_FAILED,
            TokenError::TokenExpiredOrInvalid => error_codes::TOKEN_EXPIRED_OR_INVALID,
            TokenError::InvalidInput { .. } => error_codes::VALIDATION_ERROR,
        }
    }
}
