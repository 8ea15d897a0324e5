//! Rate Limiting Tests

use axum::http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn test_requests_over_limit_are_rejected() {
    let app = TestApp::with_rate_limit(2);

    for remaining in ["1", "0"] {
        let response = app
            .server
            .get("/users/1/chats")
            .add_header("x-forwarded-for", "203.0.113.9")
            .await;
        assert_eq!(response.headers()["x-ratelimit-limit"], "2");
        assert_eq!(response.headers()["x-ratelimit-remaining"], remaining);
    }

    let response = app
        .server
        .get("/users/1/chats")
        .add_header("x-forwarded-for", "203.0.113.9")
        .await;

    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));
    let json: serde_json::Value = response.json();
    assert_eq!(json["code"], 10006);
}

#[tokio::test]
async fn test_clients_limited_separately() {
    let app = TestApp::with_rate_limit(1);

    for client in ["198.51.100.1", "198.51.100.2"] {
        let response = app
            .server
            .get("/users/1/chats")
            .add_header("x-forwarded-for", client)
            .await;
        assert_ne!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let app = TestApp::with_rate_limit(1);

    for _ in 0..3 {
        let response = app
            .server
            .get("/health")
            .add_header("x-forwarded-for", "203.0.113.10")
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
}
