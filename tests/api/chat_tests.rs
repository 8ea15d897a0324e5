//! Chat API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use chat_messaging::domain::{Chat, Message};

use crate::common::{assert_error, TestApp};

#[tokio::test]
async fn test_create_chat() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/chats")
        .json(&json!({
            "participant1Id": 1,
            "participant2Id": 2,
            "metadata": "Lunch plans",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let json: serde_json::Value = response.json();
    assert_eq!(json["id"], 1);
    assert_eq!(json["participant1Id"], 1);
    assert_eq!(json["participant2Id"], 2);
    assert_eq!(json["metadata"], "Lunch plans");
    assert!(json["createdAt"].is_string());
}

#[tokio::test]
async fn test_chat_ids_increase() {
    let app = TestApp::new();

    let first = app.create_chat(1, 2).await;
    let second = app.create_chat(3, 4).await;

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[test_case(1, 1 ; "same participant twice")]
#[test_case(1, 5 ; "unknown second participant")]
#[test_case(0, 2 ; "unknown first participant")]
#[tokio::test]
async fn test_create_chat_invalid_participants(p1: i64, p2: i64) {
    let app = TestApp::new();

    let response = app
        .server
        .post("/chats")
        .json(&json!({ "participant1Id": p1, "participant2Id": p2 }))
        .await;

    assert_error(
        &response,
        StatusCode::UNPROCESSABLE_ENTITY,
        "INVALID_PARTICIPANTS",
    );
}

#[tokio::test]
async fn test_create_chat_malformed_body() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/chats")
        .json(&json!({ "participant1Id": "one" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_chat_messages_in_order() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;
    app.send_message(chat.id, 1, "hi").await;
    app.send_message(chat.id, 2, "hello").await;
    app.send_message(chat.id, 1, "how are you?").await;

    let response = app
        .server
        .get(&format!("/chats/{}/messages", chat.id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let messages: Vec<Message> = response.json();
    let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["hi", "hello", "how are you?"]);
}

#[tokio::test]
async fn test_get_messages_of_empty_chat() {
    let app = TestApp::new();
    let chat = app.create_chat(1, 2).await;

    let response = app
        .server
        .get(&format!("/chats/{}/messages", chat.id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let messages: Vec<Message> = response.json();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_get_messages_errors() {
    let app = TestApp::new();

    let response = app.server.get("/chats/999/messages").await;
    assert_error(&response, StatusCode::NOT_FOUND, "CHAT_NOT_FOUND");

    let response = app.server.get("/chats/0/messages").await;
    assert_error(&response, StatusCode::BAD_REQUEST, "INVALID_IDENTIFIER");

    let response = app.server.get("/chats/abc/messages").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_chats_for_user() {
    let app = TestApp::new();
    app.create_chat(1, 2).await;
    app.create_chat(3, 4).await;
    app.create_chat(2, 3).await;

    let response = app.server.get("/users/2/chats").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let chats: Vec<Chat> = response.json();
    let ids: Vec<_> = chats.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(chats.iter().all(|c| c.has_participant(2)));
}

#[tokio::test]
async fn test_list_chats_for_user_errors() {
    let app = TestApp::new();
    app.create_chat(1, 2).await;

    let response = app.server.get("/users/4/chats").await;
    assert_error(&response, StatusCode::NOT_FOUND, "NO_CHATS_FOR_USER");

    let response = app.server.get("/users/42/chats").await;
    assert_error(&response, StatusCode::NOT_FOUND, "UNKNOWN_USER");
}
