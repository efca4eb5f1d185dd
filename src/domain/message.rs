use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A stored chat message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: String,
    /// Seconds since the Unix epoch, assigned by the server at send time.
    pub timestamp: i64,
}

impl Message {
    #[must_use]
    pub const fn new(text: String, sender: String, timestamp: i64) -> Self {
        Self { text, sender, timestamp }
    }

    /// Builds a message stamped with the current server time.
    #[must_use]
    pub fn stamped_now(text: String, sender: String) -> Self {
        Self::new(text, sender, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Attaches the chat label the caller asked for.
    #[must_use]
    pub fn labeled(self, chat: &str) -> ChatMessage {
        ChatMessage { chat: chat.to_string(), text: self.text, sender: self.sender, send_time: self.timestamp }
    }
}

/// A message as returned to a reader, labeled with the caller's own chat identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub chat: String,
    pub text: String,
    pub sender: String,
    pub send_time: i64,
}
