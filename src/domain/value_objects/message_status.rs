//! Message delivery status.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Delivery status of a message.
///
/// Serialized as lowercase strings (`"sent"`, `"delivered"`, `"read"`, `"failed"`).
/// Which status may follow which is decided by [`TransitionRules`], not here.
///
/// [`TransitionRules`]: super::TransitionRules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Accepted by the server; the initial status of every message
    #[default]
    Sent,
    /// Handed to the recipient's device
    Delivered,
    /// Opened by the recipient
    Read,
    /// Delivery was given up
    Failed,
}

impl MessageStatus {
    /// Every status in the closed set.
    pub const ALL: [MessageStatus; 4] = [Self::Sent, Self::Delivered, Self::Read, Self::Failed];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
            Self::Failed => "failed",
        }
    }

    /// Membership test against the closed status set.
    pub fn is_valid(raw: &str) -> bool {
        raw.parse::<Self>().is_ok()
    }
}

impl FromStr for MessageStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
