//! Chat entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserDirectory;
use crate::domain::error::{DomainError, RepositoryError};

/// A conversation between exactly two users.
///
/// Immutable once stored. `id` is `0` until the repository assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: i64,
    pub participant1_id: i64,
    pub participant2_id: i64,

    /// Free-form description supplied by the creator
    #[serde(default)]
    pub metadata: String,

    pub created_at: DateTime<Utc>,
}

impl Chat {
    /// Create an unsaved chat between two distinct, known users.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParticipants` if the ids are equal or
    /// either one is not a valid user.
    pub fn new(
        participant1_id: i64,
        participant2_id: i64,
        users: &dyn UserDirectory,
    ) -> Result<Self, DomainError> {
        if participant1_id == participant2_id
            || !users.is_valid_user(participant1_id)
            || !users.is_valid_user(participant2_id)
        {
            return Err(DomainError::InvalidParticipants {
                participant1_id,
                participant2_id,
            });
        }

        Ok(Self {
            id: 0,
            participant1_id,
            participant2_id,
            metadata: String::new(),
            created_at: Utc::now(),
        })
    }

    /// Attach free-form metadata.
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = metadata.into();
        self
    }

    /// Check if `user_id` is one of the two participants.
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.participant1_id == user_id || self.participant2_id == user_id
    }
}

/// Repository trait for Chat data access operations.
///
/// Implementations hand out copies; callers never hold a reference into the store.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Store a chat under the next free id and return it with that id.
    async fn create(&self, chat: Chat) -> Result<Chat, RepositoryError>;

    /// Find a chat by id.
    async fn get_by_id(&self, id: i64) -> Result<Chat, RepositoryError>;

    /// All chats `user_id` participates in, in no particular order.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Chat>, RepositoryError>;
}
