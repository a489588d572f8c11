mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use chrono::Utc;
use common::{body_json, claims, sign_raw, TestApp, ALICE_ID, TEST_JWT_SECRET};
use entity_service::services::JwtService;
use secrecy::Secret;
use serde_json::json;
use tower::util::ServiceExt;

const PROTECTED_ROUTES: [(&str, &str); 7] = [
    ("GET", "/api/v1/entity/get"),
    ("POST", "/api/v1/entity/create"),
    ("PATCH", "/api/v1/entity/update/5f0c6f4e-4d3b-4a52-9a59-9d8a0f3c2b11"),
    ("DELETE", "/api/v1/entity/delete/5f0c6f4e-4d3b-4a52-9a59-9d8a0f3c2b11"),
    ("GET", "/api/v1/entity/check"),
    ("GET", "/api/v1/entity/test-grpc"),
    ("GET", "/api/v1/entity/test-grpc-user-info"),
];

async fn assert_unauthorized(app: &TestApp, token: Option<&str>) {
    for (method, uri) in PROTECTED_ROUTES {
        let method = Method::from_bytes(method.as_bytes()).unwrap();
        let response = app
            .send(method, uri, token, Some(r#"{"description":"x"}"#))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "error", "message": "Unauthorized" })
        );
    }
    assert_eq!(app.store.operation_count(), 0);
}

#[tokio::test]
async fn test_missing_header_never_reaches_store() {
    let app = TestApp::new();
    assert_unauthorized(&app, None).await;
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new();
    assert_unauthorized(&app, Some("not.a.jwt")).await;
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new();
    let token = app
        .jwt
        .issue(&claims(ALICE_ID, "alice", Utc::now().timestamp() - 60))
        .unwrap();
    assert_unauthorized(&app, Some(&token)).await;
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new();
    let other = JwtService::new(&Secret::new("some-other-secret".to_string())).unwrap();
    let token = other
        .issue(&claims(ALICE_ID, "alice", Utc::now().timestamp() + 3600))
        .unwrap();
    assert_unauthorized(&app, Some(&token)).await;
}

#[tokio::test]
async fn test_non_uuid_user_id_is_rejected() {
    let app = TestApp::new();
    let token = sign_raw(
        &json!({
            "user_id": "alice",
            "username": "alice",
            "email": "alice@example.com",
            "role": "user",
            "permissions": [],
            "exp": Utc::now().timestamp() + 3600
        }),
        TEST_JWT_SECRET,
    );
    assert_unauthorized(&app, Some(&token)).await;
}

#[tokio::test]
async fn test_missing_role_is_rejected() {
    let app = TestApp::new();
    let token = sign_raw(
        &json!({
            "user_id": ALICE_ID,
            "username": "alice",
            "email": "alice@example.com",
            "permissions": [],
            "exp": Utc::now().timestamp() + 3600
        }),
        TEST_JWT_SECRET,
    );
    assert_unauthorized(&app, Some(&token)).await;
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() {
    let app = TestApp::new();
    let token = app.token_for(ALICE_ID, "alice");

    let request = Request::builder()
        .uri("/api/v1/entity/get")
        .header(header::AUTHORIZATION, format!("Token {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.operation_count(), 0);
}

#[tokio::test]
async fn test_valid_token_is_admitted() {
    let app = TestApp::new();
    let token = app.token_for(ALICE_ID, "alice");

    let response = app
        .send(Method::GET, "/api/v1/entity/get", Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.store.operation_count(), 1);
}

#[tokio::test]
async fn test_token_with_audience_is_admitted() {
    let app = TestApp::new();
    let token = sign_raw(
        &json!({
            "user_id": ALICE_ID,
            "username": "alice",
            "email": "alice@example.com",
            "role": "user",
            "permissions": [],
            "exp": Utc::now().timestamp() + 3600,
            "aud": "entity-service"
        }),
        TEST_JWT_SECRET,
    );

    let response = app
        .send(Method::GET, "/api/v1/entity/get", Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.store.operation_count(), 1);
}

#[tokio::test]
async fn test_lowercase_bearer_scheme_is_admitted() {
    let app = TestApp::new();
    let token = app.token_for(ALICE_ID, "alice");

    let request = Request::builder()
        .uri("/api/v1/entity/get")
        .header(header::AUTHORIZATION, format!("bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
