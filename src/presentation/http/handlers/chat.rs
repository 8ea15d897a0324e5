//! Chat Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::CreateChatRequest;
use crate::domain::{Chat, Message};
use crate::presentation::http::extractors::{IdPath, JsonBody};
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Open a chat between two users
pub async fn create_chat(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateChatRequest>,
) -> Result<(StatusCode, Json<Chat>), AppError> {
    validate(&body)?;

    let chat = state
        .messages
        .create_chat(body.participant1_id, body.participant2_id, body.metadata)
        .await?;

    Ok((StatusCode::CREATED, Json(chat)))
}

/// Get all messages of a chat
pub async fn get_messages(
    State(state): State<AppState>,
    IdPath(chat_id): IdPath,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state.messages.get_messages(chat_id).await?;
    Ok(Json(messages))
}
