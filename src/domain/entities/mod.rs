//! # Domain Entities
//!
//! Core domain entities of the messaging backend.
//!
//! ## Core Entities
//!
//! - **Chat**: A conversation between exactly two users
//! - **Message**: Content sent within a chat, with a delivery status
//!
//! ## Supporting Types
//!
//! - **Attachment**: File metadata owned by a message
//! - **User**: A member of the closed user set, checked through `UserDirectory`
//!
//! ## Repository Traits
//!
//! Chat and Message each have a repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer,
//! following the dependency inversion principle.

mod attachment;
mod chat;
mod message;
mod user;

pub use attachment::{Attachment, MAX_ATTACHMENT_SIZE};
pub use chat::{Chat, ChatRepository};
pub use message::{Message, MessageRepository};
pub use user::{User, UserDirectory};
