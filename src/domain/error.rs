//! Domain layer error definitions.

use thiserror::Error;

use super::value_objects::MessageStatus;

/// Violations of entity invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Participants are equal or not both valid users
    #[error("participants must be two different valid users (got {participant1_id} and {participant2_id})")]
    InvalidParticipants {
        participant1_id: i64,
        participant2_id: i64,
    },

    /// Sender is not a known user
    #[error("invalid sender: user {0} does not exist")]
    InvalidSender(i64),

    /// Sender is a known user but not part of the chat
    #[error("sender {sender_id} is not a participant of chat {chat_id}")]
    NotParticipant { sender_id: i64, chat_id: i64 },

    /// Status name outside the closed set
    #[error("invalid message status: {0:?}")]
    InvalidStatus(String),

    /// Status change not allowed by the transition rules
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: MessageStatus,
        to: MessageStatus,
    },
}

/// Errors raised by repository implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No entity stored under the id
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}
