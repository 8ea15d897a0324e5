//! Chat Repository Implementation
//!
//! In-memory implementation of chat storage.

use async_trait::async_trait;

use super::table::Table;
use crate::domain::{Chat, ChatRepository, RepositoryError};

/// In-memory chat repository.
///
/// Thread-safe; ids are allocated from a process-local counter starting at 1.
pub struct InMemoryChatRepository {
    chats: Table<Chat>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self {
            chats: Table::new(),
        }
    }
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create(&self, chat: Chat) -> Result<Chat, RepositoryError> {
        let created = self.chats.insert(chat, |chat, id| chat.id = id);
        tracing::debug!(chat_id = created.id, "Chat stored");
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Chat, RepositoryError> {
        self.chats
            .get(id)
            .ok_or_else(|| RepositoryError::not_found("chat", id))
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Chat>, RepositoryError> {
        Ok(self.chats.scan(|chat| chat.has_participant(user_id)))
    }
}
