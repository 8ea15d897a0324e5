//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::TestApp;

/// Test basic health check endpoint returns 200 OK
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json.get("version").is_some());
}

/// Test liveness endpoint
#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new();

    let response = app.server.get("/health/live").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], "alive");
}

/// Test readiness endpoint reports the publisher backend
#[tokio::test]
async fn test_readiness() {
    let app = TestApp::new();

    let response = app.server.get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], "ready");
    assert_eq!(json["publisher"], "log");
}

/// Health stays open when auth is enabled
#[tokio::test]
async fn test_health_does_not_require_auth() {
    let app = TestApp::with_auth();

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

/// Metrics are exposed in Prometheus text format
#[tokio::test]
async fn test_metrics_endpoint() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;
    app.send_message(chat.id, 1, "count me").await;

    let response = app.server.get("/metrics").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let text = response.text();
    assert!(text.contains("chat_messaging_messages_sent_total"));
    assert!(text.contains("chat_messaging_chats_created_total"));
    assert!(text.contains("chat_messaging_http_requests_total"));
}

/// Unknown routes get a JSON 404
#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();

    let response = app.server.get("/nope").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = response.json();
    assert_eq!(json["code"], 10001);
}
