//! Redis Publisher
//!
//! Publishes message events on a Redis pub/sub channel.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{debug, info, instrument};

use super::{MessagePublisher, PublishError};

/// Publisher backed by Redis `PUBLISH`.
///
/// Uses a `ConnectionManager`, which reconnects on its own after a dropped
/// connection; a publish attempted while disconnected simply fails.
#[derive(Clone)]
pub struct RedisPublisher {
    conn: ConnectionManager,
    channel: String,
}

impl RedisPublisher {
    /// Wrap an existing connection.
    pub fn new(conn: ConnectionManager, channel: impl Into<String>) -> Self {
        Self {
            conn,
            channel: channel.into(),
        }
    }

    /// Connect to `url` and publish on `channel`.
    #[instrument(skip(url), fields(channel = %channel))]
    pub async fn connect(url: &str, channel: &str) -> Result<Self, PublishError> {
        info!("Connecting publisher to Redis...");
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        info!("Redis publisher connected");
        Ok(Self::new(conn, channel))
    }
}

#[async_trait]
impl MessagePublisher for RedisPublisher {
    async fn publish(&self, payload: Vec<u8>) -> Result<(), PublishError> {
        let mut conn = self.conn.clone();
        let receivers: i64 = conn.publish(&self.channel, payload).await?;
        debug!(channel = %self.channel, receivers, "Message event published");
        Ok(())
    }
}
