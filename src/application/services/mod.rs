//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **MessageService**: Chats, messages and message status changes

pub mod message_service;

pub use message_service::{MessageError, MessageService, MessageServiceImpl};
