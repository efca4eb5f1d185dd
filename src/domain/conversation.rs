use crate::error::{AppError, Result};
use std::fmt;

/// Separator between the two participants of a chat, and inside conversation keys.
pub const DELIMITER: char = ':';

/// Canonical, order-independent identifier of a two-party conversation.
///
/// Both participants are lower-cased and the lexicographically smaller one comes
/// first, so `alice:bob`, `bob:alice` and `Bob:ALICE` all resolve to `alice:bob`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey(String);

impl ConversationKey {
    /// Resolves the canonical key for a `user1:user2` chat identifier.
    ///
    /// # Errors
    /// Returns `AppError::InvalidChatFormat` unless the identifier splits into exactly two
    /// non-empty participants.
    pub fn resolve(chat: &str) -> Result<Self> {
        let lowered = chat.to_lowercase();
        let (a, b) = split_pair(&lowered).ok_or_else(|| AppError::InvalidChatFormat(chat.to_string()))?;
        let (first, second) = if a > b { (b, a) } else { (a, b) };
        Ok(Self(format!("{first}{DELIMITER}{second}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two participants of a chat exactly as the caller wrote them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participants<'a> {
    first: &'a str,
    second: &'a str,
}

impl<'a> Participants<'a> {
    /// Splits a raw chat identifier without normalizing case.
    ///
    /// # Errors
    /// Returns `AppError::InvalidChatFormat` unless the identifier splits into exactly two
    /// non-empty participants.
    pub fn parse(chat: &'a str) -> Result<Self> {
        let (first, second) = split_pair(chat).ok_or_else(|| AppError::InvalidChatFormat(chat.to_string()))?;
        Ok(Self { first, second })
    }

    /// Case-sensitive membership check.
    #[must_use]
    pub fn contains(&self, sender: &str) -> bool {
        self.first == sender || self.second == sender
    }
}

fn split_pair(chat: &str) -> Option<(&str, &str)> {
    let (a, b) = chat.split_once(DELIMITER)?;
    if a.is_empty() || b.is_empty() || b.contains(DELIMITER) {
        return None;
    }
    Some((a, b))
}
