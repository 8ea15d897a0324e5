//! Message Service
//!
//! Chat creation, message sending and retrieval, and message status updates.
//!
//! Every accepted message and every status change is handed to the
//! [`MessagePublisher`] on a detached task. The use case never waits for the
//! broker and never sees its failures.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    Attachment, Chat, ChatRepository, DomainError, Message, MessageRepository, MessageStatus,
    RepositoryError, TransitionRules, UserDirectory,
};
use crate::infrastructure::metrics;
use crate::infrastructure::publisher::MessagePublisher;
use crate::shared::error::ErrorKind;

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Open a chat between two distinct, known users
    async fn create_chat(
        &self,
        participant1_id: i64,
        participant2_id: i64,
        metadata: Option<String>,
    ) -> Result<Chat, MessageError>;

    /// Send a message into an existing chat
    async fn send_message(
        &self,
        chat_id: i64,
        sender_id: i64,
        content: String,
        attachments: Option<Vec<Attachment>>,
    ) -> Result<Message, MessageError>;

    /// All messages of a chat, oldest first
    async fn get_messages(&self, chat_id: i64) -> Result<Vec<Message>, MessageError>;

    /// A single message
    async fn get_message(&self, message_id: i64) -> Result<Message, MessageError>;

    /// All chats a user takes part in, by id
    async fn list_chats_for_user(&self, user_id: i64) -> Result<Vec<Chat>, MessageError>;

    /// Move a message to `status` if the transition rules allow it
    async fn update_message_status(
        &self,
        message_id: i64,
        status: &str,
    ) -> Result<Message, MessageError>;
}

/// Message service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("chat {0} not found")]
    ChatNotFound(i64),

    #[error("message {0} not found")]
    MessageNotFound(i64),

    #[error("user {0} not found")]
    UnknownUser(i64),

    #[error("no chats found for user {0}")]
    NoChatsForUser(i64),

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(i64),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl MessageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MessageError::ChatNotFound(_)
            | MessageError::MessageNotFound(_)
            | MessageError::UnknownUser(_)
            | MessageError::NoChatsForUser(_)
            | MessageError::Repository(_) => ErrorKind::NotFound,
            MessageError::InvalidIdentifier(_) | MessageError::Domain(_) => ErrorKind::Validation,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            MessageError::ChatNotFound(_) => "CHAT_NOT_FOUND",
            MessageError::MessageNotFound(_) => "MESSAGE_NOT_FOUND",
            MessageError::UnknownUser(_) => "UNKNOWN_USER",
            MessageError::NoChatsForUser(_) => "NO_CHATS_FOR_USER",
            MessageError::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            MessageError::Repository(_) => "NOT_FOUND",
            MessageError::Domain(e) => match e {
                DomainError::InvalidParticipants { .. } => "INVALID_PARTICIPANTS",
                DomainError::InvalidSender(_) => "INVALID_SENDER",
                DomainError::NotParticipant { .. } => "NOT_PARTICIPANT",
                DomainError::InvalidStatus(_) => "INVALID_STATUS",
                DomainError::InvalidTransition { .. } => "INVALID_TRANSITION",
            },
        }
    }
}

/// Event names used in logs and the publish failure metric
const EVENT_CREATED: &str = "created";
const EVENT_STATUS_UPDATED: &str = "status_updated";

/// MessageService implementation
pub struct MessageServiceImpl<C, M>
where
    C: ChatRepository,
    M: MessageRepository,
{
    chat_repo: Arc<C>,
    message_repo: Arc<M>,
    users: Arc<dyn UserDirectory>,
    rules: Arc<TransitionRules>,
    publisher: Arc<dyn MessagePublisher>,
}

impl<C, M> MessageServiceImpl<C, M>
where
    C: ChatRepository,
    M: MessageRepository,
{
    pub fn new(
        chat_repo: Arc<C>,
        message_repo: Arc<M>,
        users: Arc<dyn UserDirectory>,
        rules: Arc<TransitionRules>,
        publisher: Arc<dyn MessagePublisher>,
    ) -> Self {
        Self {
            chat_repo,
            message_repo,
            users,
            rules,
            publisher,
        }
    }

    async fn fetch_chat(&self, chat_id: i64) -> Result<Chat, MessageError> {
        self.chat_repo
            .get_by_id(chat_id)
            .await
            .map_err(|_| MessageError::ChatNotFound(chat_id))
    }

    async fn fetch_message(&self, message_id: i64) -> Result<Message, MessageError> {
        self.message_repo
            .get_by_id(message_id)
            .await
            .map_err(|_| MessageError::MessageNotFound(message_id))
    }

    /// Hand `message` to the publisher without waiting for the outcome.
    fn publish_detached(&self, message: &Message, event: &'static str) {
        let message_id = message.id;
        let payload = match serde_json::to_vec(message) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(message_id, event, error = %e, "Failed to encode message event");
                metrics::record_publish_failure(event);
                return;
            }
        };

        let publisher = Arc::clone(&self.publisher);
        tokio::spawn(async move {
            match publisher.publish(payload).await {
                Ok(()) => debug!(message_id, event, "Message event published"),
                Err(e) => {
                    warn!(
                        message_id,
                        event,
                        kind = ?e.kind(),
                        error = %e,
                        "Failed to publish message event"
                    );
                    metrics::record_publish_failure(event);
                }
            }
        });
    }
}

#[async_trait]
impl<C, M> MessageService for MessageServiceImpl<C, M>
where
    C: ChatRepository + 'static,
    M: MessageRepository + 'static,
{
    #[instrument(skip(self, metadata))]
    async fn create_chat(
        &self,
        participant1_id: i64,
        participant2_id: i64,
        metadata: Option<String>,
    ) -> Result<Chat, MessageError> {
        let mut chat = Chat::new(participant1_id, participant2_id, self.users.as_ref())?;
        if let Some(metadata) = metadata {
            chat = chat.with_metadata(metadata);
        }

        let chat = self.chat_repo.create(chat).await?;

        metrics::record_chat_created();
        info!(chat_id = chat.id, "Chat created");
        Ok(chat)
    }

    #[instrument(skip(self, content, attachments))]
    async fn send_message(
        &self,
        chat_id: i64,
        sender_id: i64,
        content: String,
        attachments: Option<Vec<Attachment>>,
    ) -> Result<Message, MessageError> {
        let chat = self.fetch_chat(chat_id).await?;
        let message = Message::new(&chat, sender_id, content, attachments, self.users.as_ref())?;

        let message = self.message_repo.create(message).await?;

        metrics::record_message_sent();
        info!(message_id = message.id, "Message sent");

        self.publish_detached(&message, EVENT_CREATED);
        Ok(message)
    }

    async fn get_messages(&self, chat_id: i64) -> Result<Vec<Message>, MessageError> {
        if chat_id <= 0 {
            return Err(MessageError::InvalidIdentifier(chat_id));
        }
        self.fetch_chat(chat_id).await?;

        let mut messages = self.message_repo.list_by_chat(chat_id).await?;
        messages.sort_by_key(|m| m.id);

        Ok(messages)
    }

    async fn get_message(&self, message_id: i64) -> Result<Message, MessageError> {
        self.fetch_message(message_id).await
    }

    async fn list_chats_for_user(&self, user_id: i64) -> Result<Vec<Chat>, MessageError> {
        if !self.users.is_valid_user(user_id) {
            return Err(MessageError::UnknownUser(user_id));
        }

        let mut chats = self.chat_repo.list_by_user(user_id).await?;
        if chats.is_empty() {
            return Err(MessageError::NoChatsForUser(user_id));
        }
        chats.sort_by_key(|c| c.id);

        Ok(chats)
    }

    #[instrument(skip(self))]
    async fn update_message_status(
        &self,
        message_id: i64,
        status: &str,
    ) -> Result<Message, MessageError> {
        let message = self.fetch_message(message_id).await?;
        let target: MessageStatus = status.parse()?;
        let updated = message.with_status(target, &self.rules)?;

        let swapped = self
            .message_repo
            .update_status_if(message_id, message.status, target)
            .await
            .map_err(|_| MessageError::MessageNotFound(message_id))?;
        if !swapped {
            // Another update moved the message since it was read
            let current = self.fetch_message(message_id).await?;
            return Err(DomainError::InvalidTransition {
                from: current.status,
                to: target,
            }
            .into());
        }

        metrics::record_status_update(target.as_str());
        info!(from = %message.status, to = %target, "Message status updated");

        self.publish_detached(&updated, EVENT_STATUS_UPDATED);
        Ok(updated)
    }
}
