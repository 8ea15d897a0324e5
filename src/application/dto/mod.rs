//! Data Transfer Objects
//!
//! DTOs for API request bodies. Responses serialize the domain entities
//! directly.

pub mod request;

pub use request::{AttachmentRequest, CreateChatRequest, SendMessageRequest, UpdateStatusRequest};
