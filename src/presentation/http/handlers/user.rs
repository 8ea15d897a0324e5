//! User Handlers

use axum::{extract::State, Json};

use crate::domain::Chat;
use crate::presentation::http::extractors::IdPath;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List the chats a user takes part in
pub async fn list_chats(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> Result<Json<Vec<Chat>>, AppError> {
    let chats = state.messages.list_chats_for_user(user_id).await?;
    Ok(Json(chats))
}
