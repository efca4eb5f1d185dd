use crate::config::MessagingConfig;
use crate::domain::conversation::{ConversationKey, Participants};
use crate::domain::message::{ChatMessage, Message};
use crate::domain::page::{Page, PageRequest};
use crate::error::{AppError, Result};
use crate::storage::MessageStore;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) sent_total: Counter<u64>,
    pub(crate) pull_page_size: Histogram<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("chat-relay-server");
        Self {
            sent_total: meter
                .u64_counter("relay_messages_sent_total")
                .with_description("Total messages accepted for storage")
                .build(),
            pull_page_size: meter
                .u64_histogram("relay_pull_page_size")
                .with_description("Number of messages returned by a single pull")
                .build(),
        }
    }
}

/// Send and pull handlers for two-party conversations.
///
/// Holds no per-request state; every call goes straight through to the store.
#[derive(Clone, Debug)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    config: MessagingConfig,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(store: Arc<dyn MessageStore>, config: MessagingConfig) -> Self {
        Self { store, config, metrics: Metrics::new() }
    }

    /// Appends a message to the conversation named by `chat`, stamped with the server time.
    ///
    /// The sender must match one of the two participants exactly as written in `chat`,
    /// while the storage key is resolved case-insensitively.
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` if `text` is empty.
    /// Returns `AppError::InvalidChatFormat` if `chat` is not `user1:user2`.
    /// Returns `AppError::SenderNotInConversation` if `sender` is neither participant.
    /// Returns `AppError::Storage` if the append fails.
    #[tracing::instrument(err(level = "warn"), skip(self, chat, sender, text), fields(chat = %chat, sender = %sender))]
    pub async fn send(&self, chat: &str, sender: &str, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(AppError::InvalidArgument("message text is required".to_string()));
        }

        let participants = Participants::parse(chat)?;
        if !participants.contains(sender) {
            return Err(AppError::SenderNotInConversation(sender.to_string()));
        }

        let key = ConversationKey::resolve(chat)?;
        let message = Message::stamped_now(text.to_string(), sender.to_string());

        match self.store.append(&key, &message).await {
            Ok(()) => {
                tracing::debug!(conversation = %key, timestamp = message.timestamp, "Message stored");
                self.metrics.sent_total.add(1, &[KeyValue::new("status", "success")]);
                Ok(())
            }
            Err(e) => {
                self.metrics.sent_total.add(1, &[KeyValue::new("status", "failure")]);
                Err(e.into())
            }
        }
    }

    /// Reads one page of the conversation named by `chat`.
    ///
    /// Returned messages are labeled with `chat` exactly as supplied. A `limit` of zero
    /// uses the configured default.
    ///
    /// # Errors
    /// Returns `AppError::InvalidChatFormat` if `chat` is not `user1:user2`.
    /// Returns `AppError::InvalidArgument` if `cursor` or `limit` is negative or too large.
    /// Returns `AppError::Storage` if the read fails.
    #[tracing::instrument(err(level = "warn"), skip(self, chat), fields(chat = %chat))]
    pub async fn pull(&self, chat: &str, cursor: i64, limit: i64, reverse: bool) -> Result<Page<ChatMessage>> {
        let key = ConversationKey::resolve(chat)?;
        let request = PageRequest::new(cursor, limit, reverse, self.config.default_limit)?;

        let entries = self.store.range(&key, request.cursor, request.fetch_end(), request.reverse).await?;
        let page = request.paginate(entries).map(|message| message.labeled(chat));

        self.metrics.pull_page_size.record(u64::try_from(page.items.len()).unwrap_or(u64::MAX), &[]);
        tracing::debug!(count = page.items.len(), has_more = page.has_more, "Page served");

        Ok(page)
    }
}
