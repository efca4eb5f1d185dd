use crate::domain::message::ChatMessage;
use crate::domain::page::Page;
use serde::{Deserialize, Serialize};

pub const SUCCESS_CODE: i32 = 0;
pub const SUCCESS_MESSAGE: &str = "success";

#[derive(Debug, Serialize, Deserialize)]
pub struct SendRequest {
    pub chat: String,
    pub sender: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendResponse {
    pub code: i32,
    pub message: String,
}

impl SendResponse {
    #[must_use]
    pub fn success() -> Self {
        Self { code: SUCCESS_CODE, message: SUCCESS_MESSAGE.to_string() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PullRequest {
    pub chat: String,
    #[serde(default)]
    pub cursor: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub reverse: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub chat: String,
    pub text: String,
    pub sender: String,
    pub send_time: i64,
}

impl From<ChatMessage> for MessageDto {
    fn from(msg: ChatMessage) -> Self {
        Self { chat: msg.chat, text: msg.text, sender: msg.sender, send_time: msg.send_time }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullResponse {
    pub code: i32,
    pub message: String,
    pub messages: Vec<MessageDto>,
    pub has_more: bool,
    pub next_cursor: i64,
}

impl From<Page<ChatMessage>> for PullResponse {
    fn from(page: Page<ChatMessage>) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: SUCCESS_MESSAGE.to_string(),
            messages: page.items.into_iter().map(MessageDto::from).collect(),
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        }
    }
}
