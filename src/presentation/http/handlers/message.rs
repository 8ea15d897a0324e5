//! Message Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::{SendMessageRequest, UpdateStatusRequest};
use crate::domain::Message;
use crate::presentation::http::extractors::{IdPath, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Send a message into a chat
pub async fn send_message(
    State(state): State<AppState>,
    JsonBody(mut body): JsonBody<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    validate(&body)?;

    let attachments = body.take_attachments();
    let message = state
        .messages
        .send_message(body.chat_id, body.sender_id, body.content, attachments)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Get a single message
pub async fn get_message(
    State(state): State<AppState>,
    IdPath(message_id): IdPath,
) -> Result<Json<Message>, AppError> {
    let message = state.messages.get_message(message_id).await?;
    Ok(Json(message))
}

/// Move a message to a new status
pub async fn update_status(
    State(state): State<AppState>,
    IdPath(message_id): IdPath,
    JsonBody(body): JsonBody<UpdateStatusRequest>,
) -> Result<Json<Message>, AppError> {
    let message = state
        .messages
        .update_message_status(message_id, &body.status)
        .await?;

    Ok(Json(message))
}
