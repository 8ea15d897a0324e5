//! Log Publisher
//!
//! Publisher that writes payloads to the log instead of a broker.

use async_trait::async_trait;
use tracing::debug;

use super::{MessagePublisher, PublishError};

/// Publisher that logs every payload and always succeeds.
#[derive(Debug, Default)]
pub struct LogPublisher;

impl LogPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessagePublisher for LogPublisher {
    async fn publish(&self, payload: Vec<u8>) -> Result<(), PublishError> {
        debug!(
            bytes = payload.len(),
            payload = %String::from_utf8_lossy(&payload),
            "Message event published"
        );
        Ok(())
    }
}
