//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::Validate;

use crate::domain::{Attachment, MAX_ATTACHMENT_SIZE};

/// Create chat request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatRequest {
    pub participant1_id: i64,

    pub participant2_id: i64,

    #[validate(length(max = 1000, message = "Metadata must be at most 1000 characters"))]
    pub metadata: Option<String>,
}

/// Send message request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub chat_id: i64,

    pub sender_id: i64,

    #[validate(length(max = 4000, message = "Content must be at most 4000 characters"))]
    pub content: String,

    #[validate(nested)]
    pub attachments: Option<Vec<AttachmentRequest>>,
}

impl SendMessageRequest {
    /// Attachments numbered from 1 in request order.
    pub fn take_attachments(&mut self) -> Option<Vec<Attachment>> {
        self.attachments.take().map(|attachments| {
            attachments
                .into_iter()
                .zip(1..)
                .map(|(attachment, id)| attachment.into_attachment(id))
                .collect()
        })
    }
}

/// Attachment metadata sent along with a message
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRequest {
    #[validate(length(min = 1, max = 2048, message = "File URL must be 1-2048 characters"))]
    pub file_url: String,

    #[validate(length(min = 1, max = 255, message = "File name must be 1-255 characters"))]
    pub file_name: String,

    #[validate(length(min = 1, max = 255, message = "MIME type must be 1-255 characters"))]
    pub mime_type: String,

    /// Size in bytes, at most 25 MiB
    #[validate(range(min = 0, max = MAX_ATTACHMENT_SIZE, message = "Size must be between 0 and 25 MiB"))]
    pub size: i64,
}

impl AttachmentRequest {
    fn into_attachment(self, id: i64) -> Attachment {
        Attachment {
            id,
            file_url: self.file_url,
            file_name: self.file_name,
            mime_type: self.mime_type,
            size: self.size,
        }
    }
}

/// Update message status request
///
/// `status` is checked by the service, after the message lookup.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}
