//! Message history endpoint.
//!
//! GET /api/messages/?limit=N -- the caller's newest `limit` messages in
//! chronological ascending order. The limit is parsed leniently: any
//! unparsable or missing value falls back to 50 rather than rejecting
//! the request.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use tokenchat_core::chat::service::DEFAULT_MESSAGE_LIMIT;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

/// Query parameters for the message listing.
///
/// `limit` stays a raw string so a bad value degrades to the default
/// instead of failing query deserialization with a 400.
#[derive(Debug, Deserialize, Default)]
pub struct MessagesQuery {
    pub limit: Option<String>,
}

impl MessagesQuery {
    fn effective_limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(DEFAULT_MESSAGE_LIMIT)
            .max(0)
    }
}

/// GET /api/messages/ - List the caller's recent messages.
pub async fn list_messages(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let messages = state
        .chat_service
        .recent_messages(user.id, query.effective_limit())
        .await?;

    let messages: Vec<serde_json::Value> = messages
        .iter()
        .map(|m| {
            json!({
                "role": m.role,
                "content": m.content,
                "created_at": m.created_at.to_rfc3339(),
            })
        })
        .collect();

    Ok(Json(json!({"ok": true, "messages": messages})))
}
