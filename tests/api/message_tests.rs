//! Message API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use chat_messaging::domain::{Message, MessageStatus};

use crate::common::{assert_error, TestApp};

#[tokio::test]
async fn test_send_message() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;

    let response = app.post_message(chat.id, 1, "hi").await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let json: serde_json::Value = response.json();
    assert_eq!(json["id"], 1);
    assert_eq!(json["chatId"], chat.id);
    assert_eq!(json["senderId"], 1);
    assert_eq!(json["content"], "hi");
    assert_eq!(json["status"], "sent");
    assert_eq!(json["attachments"], json!([]));
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_send_message_with_attachments() {
    let app = TestApp::new();
    let chat = app.create_chat(3, 4).await;

    let response = app
        .server
        .post("/messages")
        .json(&json!({
            "chatId": chat.id,
            "senderId": 4,
            "content": "",
            "attachments": [
                {
                    "fileUrl": "http://localhost:8080/uploads/cat.png",
                    "fileName": "cat.png",
                    "mimeType": "image/png",
                    "size": 2048
                },
                {
                    "fileUrl": "http://localhost:8080/uploads/notes.txt",
                    "fileName": "notes.txt",
                    "mimeType": "text/plain",
                    "size": 12
                }
            ]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let message: Message = response.json();
    assert_eq!(message.attachments.len(), 2);
    assert_eq!(message.attachments[0].id, 1);
    assert_eq!(message.attachments[0].file_name, "cat.png");
    assert_eq!(message.attachments[0].mime_type, "image/png");
    assert_eq!(message.attachments[1].id, 2);
}

#[tokio::test]
async fn test_send_message_to_missing_chat() {
    let app = TestApp::new();

    let response = app.post_message(999, 1, "hello?").await;

    assert_error(&response, StatusCode::NOT_FOUND, "CHAT_NOT_FOUND");
}

#[tokio::test]
async fn test_send_message_sender_rules() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;

    let response = app.post_message(chat.id, 3, "let me in").await;
    assert_error(&response, StatusCode::UNPROCESSABLE_ENTITY, "NOT_PARTICIPANT");

    let response = app.post_message(chat.id, 77, "who am i").await;
    assert_error(&response, StatusCode::UNPROCESSABLE_ENTITY, "INVALID_SENDER");
}

#[tokio::test]
async fn test_send_message_validation() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;

    let response = app.post_message(chat.id, 1, &"x".repeat(4001)).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_FAILED");

    let response = app
        .server
        .post("/messages")
        .json(&json!({
            "chatId": chat.id,
            "senderId": 1,
            "content": "too big",
            "attachments": [{
                "fileUrl": "http://localhost:8080/uploads/movie.mp4",
                "fileName": "movie.mp4",
                "mimeType": "video/mp4",
                "size": 100_000_000
            }]
        }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_get_message() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;
    let sent = app.send_message(chat.id, 2, "fetch me").await;

    let response = app.server.get(&format!("/messages/{}", sent.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Message>(), sent);

    let response = app.server.get("/messages/123").await;
    assert_error(&response, StatusCode::NOT_FOUND, "MESSAGE_NOT_FOUND");
}

#[tokio::test]
async fn test_status_lifecycle() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;
    let message = app.send_message(chat.id, 1, "track me").await;

    let response = app.update_status(message.id, "delivered").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Message>().status, MessageStatus::Delivered);

    let response = app.update_status(message.id, "read").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let read: Message = response.json();
    assert_eq!(read.status, MessageStatus::Read);
    assert_eq!(read.content, "track me");

    let stored: Message = app
        .server
        .get(&format!("/messages/{}", message.id))
        .await
        .json();
    assert_eq!(stored, read);
}

#[tokio::test]
async fn test_status_cannot_skip_delivered() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;
    let message = app.send_message(chat.id, 1, "hi").await;

    let response = app.update_status(message.id, "read").await;

    assert_error(
        &response,
        StatusCode::UNPROCESSABLE_ENTITY,
        "INVALID_TRANSITION",
    );
}

#[tokio::test]
async fn test_status_update_errors() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;
    let message = app.send_message(chat.id, 1, "hi").await;

    let response = app.update_status(message.id, "archived").await;
    assert_error(&response, StatusCode::UNPROCESSABLE_ENTITY, "INVALID_STATUS");

    let response = app.update_status(999, "delivered").await;
    assert_error(&response, StatusCode::NOT_FOUND, "MESSAGE_NOT_FOUND");

    let response = app.update_status(message.id, "").await;
    assert_error(&response, StatusCode::UNPROCESSABLE_ENTITY, "INVALID_STATUS");

    // A missing message wins over an empty status
    let response = app.update_status(999, "").await;
    assert_error(&response, StatusCode::NOT_FOUND, "MESSAGE_NOT_FOUND");

    let response = app
        .server
        .put(&format!("/messages/{}/status", message.id))
        .json(&json!({ "state": "delivered" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failed_is_terminal() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;
    let message = app.send_message(chat.id, 1, "doomed").await;

    assert_eq!(
        app.update_status(message.id, "failed").await.status_code(),
        StatusCode::OK
    );

    let response = app.update_status(message.id, "sent").await;
    assert_error(
        &response,
        StatusCode::UNPROCESSABLE_ENTITY,
        "INVALID_TRANSITION",
    );
}
