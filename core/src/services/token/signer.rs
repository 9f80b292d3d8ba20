//! HMAC signing and verification of compact tokens

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

/// Claims as they appear inside the signed payload
///
/// `exp` is the RFC 7519 expiry rounded up to the next second so other JWT
/// readers agree with us; `exp_ms` is the authoritative expiry.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub exp_ms: i64,
    pub jti: String,
}

/// Stateless signer for subject-bound tokens
///
/// The secret is supplied on every call, so one signer serves any number of
/// callers with independent keys.
#[derive(Debug, Clone)]
pub struct JwtSigner {
    algorithm: Algorithm,
    validation: Validation,
}

impl Default for JwtSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl JwtSigner {
    /// Creates an HS512 signer
    pub fn new() -> Self {
        let algorithm = Algorithm::HS512;

        let mut validation = Validation::new(algorithm);
        // Expiry is checked against `exp_ms` after decoding
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            algorithm,
            validation,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Issues a token for `subject` that expires `ttl` from now
    pub fn issue(&self, subject: &str, secret: &str, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(subject, secret, ttl, Utc::now())
    }

    /// Issues a token as if the clock read `now`
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - empty subject or secret, non-positive or overflowing ttl
    /// * `IssuanceFailed` - encoding failed
    pub fn issue_at(
        &self,
        subject: &str,
        secret: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::invalid_input("subject"));
        }
        if secret.is_empty() {
            return Err(TokenError::invalid_input("secret"));
        }
        if ttl <= Duration::zero() {
            return Err(TokenError::invalid_input("ttl"));
        }
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::invalid_input("ttl"))?;

        let exp_ms = expires_at.timestamp_millis();
        let claims = WireClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp_ms.div_euclid(1000) + i64::from(exp_ms.rem_euclid(1000) != 0),
            exp_ms,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| TokenError::IssuanceFailed {
            reason: e.to_string(),
        })
    }

    /// Verifies `token` against `secret` and the current clock
    pub fn verify(&self, token: &str, secret: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, secret, Utc::now())
    }

    /// Verifies `token` as if the clock read `now`
    ///
    /// The signature is checked before the expiry, so a forged token is
    /// reported as `SignatureInvalid` even when it is also stale.
    pub fn verify_at(
        &self,
        token: &str,
        secret: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let data = decode::<WireClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::SignatureInvalid
            }
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

        let claims = data.claims;
        let issued_at = Utc
            .timestamp_opt(claims.iat, 0)
            .single()
            .ok_or(TokenError::Malformed)?;
        let expires_at = Utc
            .timestamp_millis_opt(claims.exp_ms)
            .single()
            .ok_or(TokenError::Malformed)?;

        let claims = Claims {
            subject: claims.sub,
            issued_at,
            expires_at,
        };
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
