//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use serde_json::json;

use chat_messaging::config::Settings;
use chat_messaging::domain::{Chat, Message};
use chat_messaging::infrastructure::publisher::LogPublisher;
use chat_messaging::startup::{build_router, AppState};

/// Basic auth credentials used when a test enables auth
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "s3cret";

/// Test application wrapping the real router with fresh in-memory stores
pub struct TestApp {
    pub server: TestServer,
}

impl TestApp {
    /// Default settings: four users, default transitions, no auth, no rate limit
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let state = AppState::new(settings, Arc::new(LogPublisher::new()))
            .expect("Failed to build application state");
        let server = TestServer::new(build_router(state)).expect("Failed to start test server");
        Self { server }
    }

    /// App with basic auth enabled using [`USERNAME`] / [`PASSWORD`]
    pub fn with_auth() -> Self {
        let mut settings = Settings::default();
        settings.auth.enabled = true;
        settings.auth.username = USERNAME.into();
        settings.auth.password = PASSWORD.into();
        Self::with_settings(settings)
    }

    /// App allowing `limit` requests per client per minute
    pub fn with_rate_limit(limit: u32) -> Self {
        let mut settings = Settings::default();
        settings.rate_limit.enabled = true;
        settings.rate_limit.requests_per_minute = limit;
        Self::with_settings(settings)
    }

    pub async fn create_chat(&self, participant1_id: i64, participant2_id: i64) -> Chat {
        let response = self
            .server
            .post("/chats")
            .json(&json!({
                "participant1Id": participant1_id,
                "participant2Id": participant2_id,
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json()
    }

    pub async fn send_message(&self, chat_id: i64, sender_id: i64, content: &str) -> Message {
        let response = self.post_message(chat_id, sender_id, content).await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json()
    }

    pub async fn post_message(&self, chat_id: i64, sender_id: i64, content: &str) -> TestResponse {
        self.server
            .post("/messages")
            .json(&json!({
                "chatId": chat_id,
                "senderId": sender_id,
                "content": content,
            }))
            .await
    }

    pub async fn update_status(&self, message_id: i64, status: &str) -> TestResponse {
        self.server
            .put(&format!("/messages/{}/status", message_id))
            .json(&json!({ "status": status }))
            .await
    }
}

/// Assert an error response's status and machine-readable kind.
pub fn assert_error(response: &TestResponse, status: StatusCode, kind: &str) {
    assert_eq!(response.status_code(), status);
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], kind, "unexpected error body: {body}");
}
