use super::{MessageStore, StorageError};
use crate::config::ValkeyConfig;
use crate::domain::conversation::ConversationKey;
use crate::domain::message::Message;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use redis::AsyncCommands;
use std::time::Duration;

/// Message log backed by one Valkey (or Redis) list per conversation.
///
/// Appends go to the tail with `RPUSH`; ranges are read with `LRANGE`, using negative
/// indices for newest-first traversal.
#[derive(Debug, Clone)]
pub struct ValkeyMessageStore {
    conn: redis::aio::ConnectionManager,
    prefix: String,
}

impl ValkeyMessageStore {
    /// Connects to Valkey, retrying with exponential backoff.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or every connection attempt fails.
    pub async fn connect(config: &ValkeyConfig) -> anyhow::Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;

        let retry_strategy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(config.min_backoff_ms))
            .with_max_delay(Duration::from_secs(config.max_backoff_secs))
            .with_max_times(config.connect_attempts);

        let conn = (|| async { client.get_connection_manager().await })
            .retry(retry_strategy)
            .notify(|e, duration| {
                tracing::warn!(error = %e, "Failed to connect to Valkey, retrying in {:?}", duration);
            })
            .await?;

        tracing::info!("Connected to Valkey");
        Ok(Self::with_connection(conn, config.key_prefix.clone()))
    }

    #[must_use]
    pub const fn with_connection(conn: redis::aio::ConnectionManager, prefix: String) -> Self {
        Self { conn, prefix }
    }

    fn list_key(&self, key: &ConversationKey) -> String {
        format!("{}{key}", self.prefix)
    }
}

fn to_index(position: i64) -> Result<isize, StorageError> {
    isize::try_from(position).map_err(|_| StorageError::PositionOutOfRange(position))
}

#[async_trait]
impl MessageStore for ValkeyMessageStore {
    async fn append(&self, key: &ConversationKey, message: &Message) -> Result<(), StorageError> {
        let payload = serde_json::to_string(message)?;
        let mut conn = self.conn.clone();
        let _: i64 = conn.rpush(self.list_key(key), payload).await?;
        Ok(())
    }

    async fn range(
        &self,
        key: &ConversationKey,
        start: i64,
        end: i64,
        reverse: bool,
    ) -> Result<Vec<Message>, StorageError> {
        let start = start.max(0);
        if end <= start {
            return Ok(Vec::new());
        }

        // LRANGE bounds are inclusive. Newest-first position p lives at index -(p + 1).
        let (from, to) = if reverse { (-to_index(end)?, -to_index(start + 1)?) } else { (to_index(start)?, to_index(end - 1)?) };

        let mut conn = self.conn.clone();
        let raw: Vec<String> = conn.lrange(self.list_key(key), from, to).await?;

        let mut messages = raw.iter().map(|entry| serde_json::from_str(entry)).collect::<Result<Vec<Message>, _>>()?;
        if reverse {
            messages.reverse();
        }
        Ok(messages)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        if reply == "PONG" { Ok(()) } else { Err(StorageError::Unavailable(format!("unexpected PING reply: {reply}"))) }
    }
}
