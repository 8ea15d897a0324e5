//! Attachment value object.

use serde::{Deserialize, Serialize};

/// Maximum accepted attachment size (25 MiB).
pub const MAX_ATTACHMENT_SIZE: i64 = 25 * 1024 * 1024;

/// File metadata carried by a message.
///
/// Owned by exactly one [`Message`](super::Message); it has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub id: i64,

    /// Where the file can be downloaded
    pub file_url: String,

    /// Original file name as uploaded
    pub file_name: String,

    /// MIME type (e.g. `image/png`)
    pub mime_type: String,

    /// Size in bytes
    pub size: i64,
}
