//! Unit tests for the HS512 signer

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::errors::TokenError;
use crate::services::token::signer::WireClaims;
use crate::services::token::JwtSigner;

const SECRET: &str = "s3cr3t";

#[test]
fn test_issue_then_verify() {
    let signer = JwtSigner::new();
    let now = Utc::now();
    let ttl = Duration::milliseconds(60_000);

    let token = signer.issue_at("u1", SECRET, ttl, now).unwrap();
    let claims = signer.verify_at(&token, SECRET, now).unwrap();

    assert_eq!(claims.subject, "u1");
    assert_eq!(claims.issued_at.timestamp(), now.timestamp());
    assert_eq!(
        claims.expires_at.timestamp_millis(),
        (now + ttl).timestamp_millis()
    );
}

#[test]
fn test_default_algorithm_is_hs512() {
    let signer = JwtSigner::new();
    let token = signer.issue("u1", SECRET, Duration::minutes(1)).unwrap();

    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::HS512);
    assert_eq!(signer.algorithm(), Algorithm::HS512);
}

#[test]
fn test_tokens_issued_at_same_instant_differ() {
    let signer = JwtSigner::new();
    let now = Utc::now();

    let first = signer.issue_at("u1", SECRET, Duration::minutes(1), now).unwrap();
    let second = signer.issue_at("u1", SECRET, Duration::minutes(1), now).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_expiry_boundary() {
    let signer = JwtSigner::new();
    let now = Utc::now();
    let ttl = Duration::milliseconds(1000);
    let token = signer.issue_at("u1", SECRET, ttl, now).unwrap();
    let claims = signer.verify_at(&token, SECRET, now).unwrap();

    let just_before = claims.expires_at - Duration::milliseconds(1);
    assert!(signer.verify_at(&token, SECRET, just_before).is_ok());

    assert_eq!(
        signer.verify_at(&token, SECRET, claims.expires_at),
        Err(TokenError::Expired)
    );
    assert_eq!(
        signer.verify_at(&token, SECRET, now + Duration::milliseconds(1100)),
        Err(TokenError::Expired)
    );
}

#[test]
fn test_expired_token_against_wall_clock() {
    let signer = JwtSigner::new();
    let issued = Utc::now() - Duration::minutes(10);
    let token = signer
        .issue_at("u1", SECRET, Duration::minutes(5), issued)
        .unwrap();

    assert_eq!(signer.verify(&token, SECRET), Err(TokenError::Expired));
}

#[test]
fn test_wrong_secret_is_signature_invalid() {
    let signer = JwtSigner::new();
    let token = signer.issue("u1", SECRET, Duration::minutes(1)).unwrap();

    assert_eq!(
        signer.verify(&token, "other-secret"),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn test_forged_and_expired_reports_signature() {
    let signer = JwtSigner::new();
    let issued = Utc::now() - Duration::minutes(10);
    let token = signer
        .issue_at("u1", SECRET, Duration::minutes(1), issued)
        .unwrap();

    assert_eq!(
        signer.verify(&token, "other-secret"),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn test_tampered_payload_is_signature_invalid() {
    let signer = JwtSigner::new();
    let token = signer.issue("u1", SECRET, Duration::minutes(1)).unwrap();
    let other = signer.issue("u2", SECRET, Duration::minutes(1)).unwrap();

    // Splice u2's payload under u1's signature
    let parts: Vec<&str> = token.split('.').collect();
    let other_parts: Vec<&str> = other.split('.').collect();
    let spliced = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

    assert_eq!(
        signer.verify(&spliced, SECRET),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn test_other_hmac_algorithm_is_signature_invalid() {
    let signer = JwtSigner::new();
    let now = Utc::now();
    let exp_ms = (now + Duration::minutes(1)).timestamp_millis();
    let claims = WireClaims {
        sub: "u1".to_string(),
        iat: now.timestamp(),
        exp: exp_ms / 1000 + 1,
        exp_ms,
        jti: "jti".to_string(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(
        signer.verify(&token, SECRET),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn test_garbage_is_malformed() {
    let signer = JwtSigner::new();

    assert_eq!(signer.verify("garbage", SECRET), Err(TokenError::Malformed));
    assert_eq!(signer.verify("", SECRET), Err(TokenError::Malformed));
    assert_eq!(signer.verify("a.b.c", SECRET), Err(TokenError::Malformed));
}

#[test]
fn test_missing_claims_is_malformed() {
    #[derive(Serialize)]
    struct Partial {
        sub: String,
        exp: i64,
    }

    let signer = JwtSigner::new();
    let token = encode(
        &Header::new(Algorithm::HS512),
        &Partial {
            sub: "u1".to_string(),
            exp: Utc::now().timestamp() + 60,
        },
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(signer.verify(&token, SECRET), Err(TokenError::Malformed));
}

#[test]
fn test_invalid_issue_input() {
    let signer = JwtSigner::new();
    let ttl = Duration::minutes(1);

    assert!(matches!(
        signer.issue("", SECRET, ttl),
        Err(TokenError::InvalidInput { field }) if field == "subject"
    ));
    assert!(matches!(
        signer.issue("u1", "", ttl),
        Err(TokenError::InvalidInput { field }) if field == "secret"
    ));
    assert!(matches!(
        signer.issue("u1", SECRET, Duration::zero()),
        Err(TokenError::InvalidInput { field }) if field == "ttl"
    ));
    assert!(matches!(
        signer.issue("u1", SECRET, Duration::milliseconds(-5)),
        Err(TokenError::InvalidInput { .. })
    ));
}
