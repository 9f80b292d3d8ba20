use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/v1/jwt/generate-token`
///
/// Lifetimes are in milliseconds; omitted ones fall back to the configured
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokenRequest {
    #[validate(length(min = 1, max = 255, message = "uniqueId must be 1-255 characters"))]
    pub unique_id: String,
    #[validate(length(min = 1, message = "secretKey must not be empty"))]
    pub secret_key: String,
    #[validate(range(min = 1, message = "accessTokenTime must be at least 1 ms"))]
    pub access_token_time: Option<i64>,
    #[validate(range(min = 1, message = "refreshTokenTime must be at least 1 ms"))]
    pub refresh_token_time: Option<i64>,
}

/// Body of `POST /api/v1/jwt/validate-token`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenRequest {
    #[validate(length(min = 1, max = 255, message = "uniqueId must be 1-255 characters"))]
    pub unique_id: String,
    #[validate(length(min = 1, message = "secretKey must not be empty"))]
    pub secret_key: String,
    #[validate(length(min = 1, message = "accessToken must not be empty"))]
    pub access_token: String,
}

/// Body of `POST /api/v1/jwt/validate-refresh-token`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRefreshTokenRequest {
    #[validate(length(min = 1, max = 255, message = "uniqueId must be 1-255 characters"))]
    pub unique_id: String,
    #[validate(length(min = 1, message = "secretKey must not be empty"))]
    pub secret_key: String,
    #[validate(length(min = 1, message = "refreshToken must not be empty"))]
    pub refresh_token: String,
}

/// Body of `POST /api/v1/jwt/regenerate-tokens`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateTokensRequest {
    #[validate(length(min = 1, max = 255, message = "uniqueId must be 1-255 characters"))]
    pub unique_id: String,
    #[validate(length(min = 1, message = "secretKey must not be empty"))]
    pub secret_key: String,
    #[validate(length(min = 1, message = "accessToken must not be empty"))]
    pub access_token: String,
    #[validate(range(min = 1, message = "accessTokenTime must be at least 1 ms"))]
    pub access_token_time: Option<i64>,
    #[validate(range(min = 1, message = "refreshTokenTime must be at least 1 ms"))]
    pub refresh_token_time: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenValidationResponse {
    pub valid: bool,
}
