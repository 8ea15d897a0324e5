//! User entity and lookup capability.

use serde::{Deserialize, Serialize};

/// A user of the messaging system.
///
/// Users are a closed set supplied by configuration; this backend never
/// creates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Read-only lookup answering whether a user id belongs to a known user.
///
/// Injected wherever user validity is checked so the backing store can change
/// without touching domain or service code.
pub trait UserDirectory: Send + Sync {
    /// Check if `user_id` refers to a known user.
    fn is_valid_user(&self, user_id: i64) -> bool;
}
