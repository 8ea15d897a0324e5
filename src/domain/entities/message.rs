//! Message entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Attachment, Chat, UserDirectory};
use crate::domain::error::{DomainError, RepositoryError};
use crate::domain::value_objects::{MessageStatus, TransitionRules};

/// A single piece of content sent within a chat by one of its participants.
///
/// Everything except `status` is fixed at creation. The serialized form is also
/// the payload handed to the event publisher:
///
/// ```json
/// {"id":1,"chatId":1,"senderId":1,"content":"hi","attachments":[],
///  "timestamp":"2024-01-01T00:00:00Z","status":"sent"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Assigned by the repository; `0` until stored
    pub id: i64,

    pub chat_id: i64,

    pub sender_id: i64,

    pub content: String,

    /// Never null; an empty list when the message has no files
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// When the message was accepted
    pub timestamp: DateTime<Utc>,

    pub status: MessageStatus,
}

impl Message {
    /// Create an unsaved message from `sender_id` in `chat`.
    ///
    /// `None` attachments become an empty list. The message starts in
    /// [`MessageStatus::Sent`].
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidSender` if `sender_id` is not a known user
    /// - `DomainError::NotParticipant` if the sender is not part of `chat`
    pub fn new(
        chat: &Chat,
        sender_id: i64,
        content: impl Into<String>,
        attachments: Option<Vec<Attachment>>,
        users: &dyn UserDirectory,
    ) -> Result<Self, DomainError> {
        if !users.is_valid_user(sender_id) {
            return Err(DomainError::InvalidSender(sender_id));
        }
        if !chat.has_participant(sender_id) {
            return Err(DomainError::NotParticipant {
                sender_id,
                chat_id: chat.id,
            });
        }

        Ok(Self {
            id: 0,
            chat_id: chat.id,
            sender_id,
            content: content.into(),
            attachments: attachments.unwrap_or_default(),
            timestamp: Utc::now(),
            status: MessageStatus::Sent,
        })
    }

    /// Check if `rules` allow moving this message to `target`.
    pub fn can_transition_to(&self, target: MessageStatus, rules: &TransitionRules) -> bool {
        rules.can_transition(self.status, target)
    }

    /// A copy of this message in `target` status.
    ///
    /// `self` is left untouched; the caller decides whether to keep the result.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if `rules` forbid the change.
    pub fn with_status(
        &self,
        target: MessageStatus,
        rules: &TransitionRules,
    ) -> Result<Self, DomainError> {
        if !self.can_transition_to(target, rules) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        Ok(Self {
            status: target,
            ..self.clone()
        })
    }
}

/// Repository trait for Message data access operations.
///
/// Implementations hand out copies; callers never hold a reference into the store.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Store a message under the next free id and return it with that id.
    async fn create(&self, message: Message) -> Result<Message, RepositoryError>;

    /// Find a message by id.
    async fn get_by_id(&self, id: i64) -> Result<Message, RepositoryError>;

    /// All messages of a chat, in no particular order.
    async fn list_by_chat(&self, chat_id: i64) -> Result<Vec<Message>, RepositoryError>;

    /// Overwrite the status of a stored message.
    ///
    /// Purely mechanical: transition rules are enforced by the caller.
    async fn update_status(&self, id: i64, status: MessageStatus) -> Result<(), RepositoryError>;

    /// Set the status of a stored message to `status` only if it is still
    /// `expected`, as one atomic step.
    ///
    /// Returns `Ok(false)` when the stored status no longer matches. Transition
    /// rules are enforced by the caller.
    async fn update_status_if(
        &self,
        id: i64,
        expected: MessageStatus,
        status: MessageStatus,
    ) -> Result<bool, RepositoryError>;
}
