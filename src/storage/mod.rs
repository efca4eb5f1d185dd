use crate::domain::conversation::ConversationKey;
use crate::domain::message::Message;
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod valkey;

pub use memory::InMemoryMessageStore;
pub use valkey::ValkeyMessageStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Valkey error: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("Corrupt message entry: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("Position {0} is outside the addressable range")]
    PositionOutOfRange(i64),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only, insertion-ordered message log keyed by conversation.
///
/// Ordering of concurrent appends to the same conversation is whatever order the
/// backend observes them in.
#[async_trait]
pub trait MessageStore: Send + Sync + std::fmt::Debug {
    /// Appends `message` to the end of the conversation's log.
    ///
    /// # Errors
    /// Returns `StorageError` if the backend rejects or cannot receive the write.
    async fn append(&self, key: &ConversationKey, message: &Message) -> Result<(), StorageError>;

    /// Returns the entries at positions `[start, end)` of the conversation's log.
    ///
    /// Positions count from the oldest entry, or from the newest when `reverse` is set,
    /// and the result is in traversal order. Positions past the end of the log yield
    /// fewer entries, never an error.
    ///
    /// # Errors
    /// Returns `StorageError` if the backend read fails or an entry cannot be decoded.
    async fn range(
        &self,
        key: &ConversationKey,
        start: i64,
        end: i64,
        reverse: bool,
    ) -> Result<Vec<Message>, StorageError>;

    /// Checks that the backend is reachable.
    ///
    /// # Errors
    /// Returns `StorageError` if the backend does not answer.
    async fn ping(&self) -> Result<(), StorageError>;
}
