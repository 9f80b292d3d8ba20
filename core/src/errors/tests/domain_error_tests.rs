//! Tests for error classification and response mapping

use tk_shared::errors::{error_codes, IntoErrorResponse};

use crate::errors::{DomainError, TokenError};

#[test]
fn test_rejections_are_unauthorized() {
    for error in [
        TokenError::Malformed,
        TokenError::SignatureInvalid,
        TokenError::Expired,
        TokenError::NotCurrent,
        TokenError::TokenExpiredOrInvalid,
    ] {
        let domain_error = DomainError::from(error);
        assert!(domain_error.is_unauthorized());
        assert!(!domain_error.is_server_fault());
        assert!(!domain_error.is_bad_request());
    }
}

#[test]
fn test_faults_are_never_unauthorized() {
    let issuance = DomainError::from(TokenError::IssuanceFailed {
        reason: "store unavailable".to_string(),
    });
    let internal = DomainError::Internal {
        message: "connection reset".to_string(),
    };

    for error in [issuance, internal] {
        assert!(error.is_server_fault());
        assert!(!error.is_unauthorized());
    }
}

#[test]
fn test_invalid_input_is_bad_request() {
    let error = DomainError::from(TokenError::InvalidInput {
        field: "secret".to_string(),
    });

    assert!(error.is_bad_request());
    assert!(!error.is_unauthorized());
    assert!(!error.is_server_fault());
    assert_eq!(error.code(), error_codes::VALIDATION_ERROR);
}

#[test]
fn test_error_response_hides_internal_details() {
    let error = DomainError::Internal {
        message: "Failed to upsert token details: connection refused".to_string(),
    };
    let response = error.to_error_response();

    assert_eq!(response.error, error_codes::INTERNAL_ERROR);
    assert!(!response.message.contains("connection refused"));
}

#[test]
fn test_error_response_for_rejection() {
    let response = DomainError::from(TokenError::Expired).to_error_response();

    assert_eq!(response.error, error_codes::TOKEN_EXPIRED);
    assert_eq!(response.message, "Token expired");
}
