//! Request and response bodies

pub mod token_dto;

pub use token_dto::{
    GenerateTokenRequest, RegenerateTokensRequest, TokenValidationResponse,
    ValidateRefreshTokenRequest, ValidateTokenRequest,
};
