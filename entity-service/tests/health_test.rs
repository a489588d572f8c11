mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, body_text, TestApp};

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new();

    let response = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "entity-service");
}

#[tokio::test]
async fn test_ready_reports_only_configured_checks() {
    let app = TestApp::new();

    let response = app.send(Method::GET, "/ready", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "up");
    assert!(body["checks"].get("mongodb").is_none());
    assert!(body["checks"].get("redis").is_none());
}

#[tokio::test]
async fn test_metrics_endpoint_is_public() {
    let app = TestApp::new();

    let response = app.send(Method::GET, "/metrics", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_text(response).await.is_empty());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();

    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::util::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-123");
}
