//! Message Repository Implementation
//!
//! In-memory implementation of message storage and status updates.

use async_trait::async_trait;

use super::table::Table;
use crate::domain::{Message, MessageRepository, MessageStatus, RepositoryError};

/// In-memory message repository.
///
/// Thread-safe; ids are allocated from a process-local counter starting at 1,
/// independent of the chat repository's counter.
pub struct InMemoryMessageRepository {
    messages: Table<Message>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self {
            messages: Table::new(),
        }
    }
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: Message) -> Result<Message, RepositoryError> {
        let created = self.messages.insert(message, |message, id| message.id = id);
        tracing::debug!(
            message_id = created.id,
            chat_id = created.chat_id,
            "Message stored"
        );
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Message, RepositoryError> {
        self.messages
            .get(id)
            .ok_or_else(|| RepositoryError::not_found("message", id))
    }

    async fn list_by_chat(&self, chat_id: i64) -> Result<Vec<Message>, RepositoryError> {
        Ok(self.messages.scan(|message| message.chat_id == chat_id))
    }

    async fn update_status(&self, id: i64, status: MessageStatus) -> Result<(), RepositoryError> {
        if self.messages.update(id, |message| message.status = status) {
            Ok(())
        } else {
            Err(RepositoryError::not_found("message", id))
        }
    }

    async fn update_status_if(
        &self,
        id: i64,
        expected: MessageStatus,
        status: MessageStatus,
    ) -> Result<bool, RepositoryError> {
        let mut swapped = false;
        let found = self.messages.update(id, |message| {
            if message.status == expected {
                message.status = status;
                swapped = true;
            }
        });

        if found {
            Ok(swapped)
        } else {
            Err(RepositoryError::not_found("message", id))
        }
    }
}
