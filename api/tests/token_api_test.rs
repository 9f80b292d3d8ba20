//! Integration tests for the token API endpoints

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};

use tk_api::{create_app, AppState};
use tk_core::repositories::{InMemoryAuditLogRepository, InMemoryTokenRepository};
use tk_core::services::audit::{AuditService, AuditServiceConfig};
use tk_core::services::token::{TokenLifecycleManager, TokenServiceConfig};

const MAX_PAYLOAD: usize = 64 * 1024;

type State = AppState<InMemoryTokenRepository, InMemoryAuditLogRepository>;

fn state() -> (web::Data<State>, Arc<InMemoryTokenRepository>) {
    let tokens = Arc::new(InMemoryTokenRepository::new());
    let audit = Arc::new(InMemoryAuditLogRepository::new());
    let audit_service = AuditService::new(
        audit,
        AuditServiceConfig {
            async_writes: false,
            ..Default::default()
        },
    );
    let manager = TokenLifecycleManager::new(
        Arc::clone(&tokens),
        audit_service,
        TokenServiceConfig::default(),
    );
    (
        web::Data::new(AppState {
            manager: Arc::new(manager),
        }),
        tokens,
    )
}

fn post(path: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(path).set_json(body)
}

fn generate_body(subject: &str) -> Value {
    json!({
        "uniqueId": subject,
        "secretKey": "s3cr3t",
        "accessTokenTime": 60000,
        "refreshTokenTime": 600000
    })
}

#[actix_web::test]
async fn test_health() {
    let (state, _) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_health_degraded_when_store_unavailable() {
    let (state, tokens) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;
    tokens.set_should_fail(true);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");

    tokens.set_should_fail(false);
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_generate_token_returns_pair() {
    let (state, _) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;

    let req = post("/api/v1/jwt/generate-token", generate_body("u1")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Tokens are generated");
    let access = body["data"]["accessToken"].as_str().unwrap();
    let refresh = body["data"]["refreshToken"].as_str().unwrap();
    assert!(!access.is_empty());
    assert_ne!(access, refresh);
}

#[actix_web::test]
async fn test_generate_token_uses_default_lifetimes() {
    let (state, _) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;

    let body = json!({ "uniqueId": "u1", "secretKey": "s3cr3t" });
    let req = post("/api/v1/jwt/generate-token", body).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_validate_token_lifecycle() {
    let (state, _) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;

    let req = post("/api/v1/jwt/generate-token", generate_body("u1")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let access = body["data"]["accessToken"].as_str().unwrap().to_string();

    let validate = json!({ "uniqueId": "u1", "secretKey": "s3cr3t", "accessToken": access });
    let req = post("/api/v1/jwt/validate-token", validate.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["valid"], true);

    // A newer pair supersedes the old access token
    let req = post("/api/v1/jwt/generate-token", generate_body("u1")).to_request();
    test::call_service(&app, req).await;
    let req = post("/api/v1/jwt/validate-token", validate).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_validate_token_wrong_secret_is_unauthorized() {
    let (state, _) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;

    let req = post("/api/v1/jwt/generate-token", generate_body("u1")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let access = body["data"]["accessToken"].as_str().unwrap();

    let validate = json!({ "uniqueId": "u1", "secretKey": "other", "accessToken": access });
    let req = post("/api/v1/jwt/validate-token", validate).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_validate_refresh_token() {
    let (state, _) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;

    let req = post("/api/v1/jwt/generate-token", generate_body("u1")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let access = body["data"]["accessToken"].as_str().unwrap();
    let refresh = body["data"]["refreshToken"].as_str().unwrap();

    let ok = json!({ "uniqueId": "u1", "secretKey": "s3cr3t", "refreshToken": refresh });
    let req = post("/api/v1/jwt/validate-refresh-token", ok).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let swapped = json!({ "uniqueId": "u1", "secretKey": "s3cr3t", "refreshToken": access });
    let req = post("/api/v1/jwt/validate-refresh-token", swapped).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_regenerate_tokens_rotates_pair() {
    let (state, _) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;

    let req = post("/api/v1/jwt/generate-token", generate_body("u1")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let old_access = body["data"]["accessToken"].as_str().unwrap().to_string();

    let regenerate = json!({
        "uniqueId": "u1",
        "secretKey": "s3cr3t",
        "accessToken": old_access,
        "accessTokenTime": 60000,
        "refreshTokenTime": 600000
    });
    let req = post("/api/v1/jwt/regenerate-tokens", regenerate.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let new_access = body["data"]["accessToken"].as_str().unwrap().to_string();
    assert_ne!(new_access, old_access);

    // The old token can no longer be used for another rotation
    let req = post("/api/v1/jwt/regenerate-tokens", regenerate).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_EXPIRED_OR_INVALID");

    let validate = json!({ "uniqueId": "u1", "secretKey": "s3cr3t", "accessToken": new_access });
    let req = post("/api/v1/jwt/validate-token", validate).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_invalid_request_is_bad_request() {
    let (state, tokens) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;

    let body = json!({ "uniqueId": "", "secretKey": "s3cr3t", "accessTokenTime": 0 });
    let req = post("/api/v1/jwt/generate-token", body).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["unique_id"].is_array());
    assert!(tokens.is_empty());
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let (state, _) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/jwt/validate-token")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_store_failure_is_server_error() {
    let (state, tokens) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;
    tokens.set_should_fail(true);

    let req = post("/api/v1/jwt/generate-token", generate_body("u1")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ISSUANCE_FAILED");
    assert_eq!(body["message"], "An internal error occurred");

    let validate = json!({ "uniqueId": "u1", "secretKey": "s3cr3t", "accessToken": "abc" });
    let req = post("/api/v1/jwt/validate-token", validate).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let (state, _) = state();
    let app = test::init_service(create_app(state, MAX_PAYLOAD)).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
