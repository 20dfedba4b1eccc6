//! Chat endpoint.
//!
//! POST /api/chat/ -- the token-metered send. The handler is thin: all
//! transaction ordering (debit before persistence, echo fallback on
//! generation failure) lives in `ChatService::send_message`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message; trimmed and validated by the service.
    pub message: String,
}

/// POST /api/chat/ - Spend one token, persist both turns, return the reply.
pub async fn send_chat(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(body) = body.map_err(|_| AppError::BadRequest)?;

    let reply = state.chat_service.send_message(user.id, &body.message).await?;

    Ok(Json(json!({
        "ok": true,
        "reply": reply.reply,
        "tokens": reply.tokens,
    })))
}
