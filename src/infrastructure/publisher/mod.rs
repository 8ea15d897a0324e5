//! Event Publisher Module
//!
//! Best-effort delivery of message events to an external broker.
//!
//! This module provides:
//! - A `MessagePublisher` trait the message service hands serialized messages to
//! - A `RedisPublisher` that `PUBLISH`es payloads on a Redis channel
//! - A `LogPublisher` that only logs payloads (development and tests)
//!
//! Publishing is fire-and-forget from the caller's point of view: the service
//! runs it on a detached task and a failure never reaches the use case that
//! triggered it. Failures are logged and counted in
//! `publish_failures_total`; nothing is retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use chat_messaging::infrastructure::publisher::create_publisher;
//!
//! let publisher = create_publisher(&settings.publisher).await?;
//! publisher.publish(serde_json::to_vec(&message)?).await?;
//! ```

mod log_publisher;
mod redis_publisher;

pub use log_publisher::LogPublisher;
pub use redis_publisher::RedisPublisher;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{PublisherBackend, PublisherSettings};
use crate::shared::error::ErrorKind;

/// Errors raised while handing a payload to the broker.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Publisher misconfigured: {0}")]
    Configuration(String),

    #[error("Publisher unavailable: {0}")]
    Unavailable(String),
}

impl PublishError {
    /// Publish failures are always transient from the core's point of view.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Transient
    }
}

/// Sink for serialized message events.
///
/// The payload is the JSON form of a [`Message`](crate::domain::Message); the
/// publisher treats it as opaque bytes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Hand one payload to the broker.
    async fn publish(&self, payload: Vec<u8>) -> Result<(), PublishError>;
}

/// Create the publisher selected by configuration.
///
/// # Errors
///
/// Fails if the Redis backend is selected without a URL or the connection
/// cannot be established.
pub async fn create_publisher(
    settings: &PublisherSettings,
) -> Result<Arc<dyn MessagePublisher>, PublishError> {
    match settings.backend {
        PublisherBackend::Log => {
            info!("Using log publisher");
            Ok(Arc::new(LogPublisher::new()))
        }
        PublisherBackend::Redis => {
            let url = settings.redis_url.as_deref().ok_or_else(|| {
                PublishError::Configuration("publisher.redis_url is required".into())
            })?;
            let publisher = RedisPublisher::connect(url, &settings.channel).await?;
            Ok(Arc::new(publisher))
        }
    }
}
