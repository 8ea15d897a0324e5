//! Static User Directory
//!
//! The configured, read-only set of users.

use std::collections::HashMap;

use crate::domain::{User, UserDirectory};

/// User directory backed by a fixed list loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: HashMap<i64, User>,
}

impl StaticUserDirectory {
    /// Build a directory from a user list. Later duplicates of an id win.
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|user| (user.id, user)).collect(),
        }
    }
}

impl UserDirectory for StaticUserDirectory {
    fn is_valid_user(&self, user_id: i64) -> bool {
        self.users.contains_key(&user_id)
    }
}
