use super::{MessageStore, StorageError};
use crate::domain::conversation::ConversationKey;
use crate::domain::message::Message;
use async_trait::async_trait;
use dashmap::DashMap;

/// Process-local message log. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    logs: DashMap<ConversationKey, Vec<Message>>,
}

impl InMemoryMessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages stored for a conversation.
    #[must_use]
    pub fn message_count(&self, key: &ConversationKey) -> usize {
        self.logs.get(key).map_or(0, |log| log.len())
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, key: &ConversationKey, message: &Message) -> Result<(), StorageError> {
        self.logs.entry(key.clone()).or_default().push(message.clone());
        Ok(())
    }

    async fn range(
        &self,
        key: &ConversationKey,
        start: i64,
        end: i64,
        reverse: bool,
    ) -> Result<Vec<Message>, StorageError> {
        let Some(log) = self.logs.get(key) else {
            return Ok(Vec::new());
        };

        // Positions beyond usize can never be populated.
        let start = usize::try_from(start.max(0)).unwrap_or(usize::MAX);
        let end = usize::try_from(end.max(0)).unwrap_or(usize::MAX);
        let take = end.saturating_sub(start);

        let entries: Vec<Message> = if reverse {
            log.iter().rev().skip(start).take(take).cloned().collect()
        } else {
            log.iter().skip(start).take(take).cloned().collect()
        };
        Ok(entries)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
