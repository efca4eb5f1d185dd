use crate::storage::StorageError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid chat ID '{0}', should be in the format of user1:user2")]
    InvalidChatFormat(String),
    #[error("sender '{0}' not in the chat room")]
    SenderNotInConversation(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Non-zero status code carried in the response body.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidChatFormat(_) => 1,
            Self::SenderNotInConversation(_) => 2,
            Self::InvalidArgument(_) => 3,
            Self::Storage(_) => 4,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match self {
            Self::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable".to_string())
            }
            e @ (Self::InvalidChatFormat(_) | Self::SenderNotInConversation(_) | Self::InvalidArgument(_)) => {
                let msg = e.to_string();
                tracing::debug!(message = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
        };

        let body = Json(json!({
            "code": code,
            "message": message
        }));

        (status, body).into_response()
    }
}
