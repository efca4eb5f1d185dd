use crate::api::AppState;
use crate::api::schemas::messaging::{PullRequest, PullResponse, SendRequest, SendResponse};
use crate::error::{AppError, Result};
use axum::{Json, extract::State, extract::rejection::JsonRejection};

fn parse_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload.map(|Json(body)| body).map_err(|e| AppError::InvalidArgument(e.body_text()))
}

/// Appends a message to a two-party chat.
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the body is malformed or the text is empty.
/// Returns `AppError::InvalidChatFormat` or `AppError::SenderNotInConversation` on validation failure.
/// Returns `AppError::Storage` if the message cannot be stored.
pub async fn send_message(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<SendResponse>> {
    let req = parse_body(payload)?;

    state.message_service.send(&req.chat, &req.sender, &req.text).await?;

    Ok(Json(SendResponse::success()))
}

/// Returns one page of a chat's history.
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the body or paging parameters are malformed.
/// Returns `AppError::InvalidChatFormat` if the chat identifier is malformed.
/// Returns `AppError::Storage` if the history cannot be read.
pub async fn pull_messages(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PullRequest>, JsonRejection>,
) -> Result<Json<PullResponse>> {
    let req = parse_body(payload)?;

    let page = state.message_service.pull(&req.chat, req.cursor, req.limit, req.reverse).await?;

    Ok(Json(page.into()))
}
