//! Application error type mapping to HTTP status codes and JSON payloads.
//!
//! Status convention (see the handler table in the router):
//! - input validation (`Empty message`, `Amount must be positive`) ->
//!   200 with `{"ok": false, "error": ...}`
//! - insufficient tokens -> 402 with the current balance in the payload
//! - malformed request body -> 400, generic
//! - missing/invalid API key -> 401
//! - anything internal -> 500, detail logged server-side only

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use tokenchat_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat workflow outcome (validation or insufficient balance).
    Chat(ChatError),
    /// Request body did not parse.
    BadRequest,
    /// Authentication failure.
    Unauthorized(String),
    /// Generic internal error. The message is logged, never sent.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Repository(inner) => AppError::Internal(inner.to_string()),
            other => AppError::Chat(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Chat(ChatError::InsufficientTokens { tokens }) => (
                StatusCode::PAYMENT_REQUIRED,
                json!({"ok": false, "error": "Insufficient tokens", "tokens": tokens}),
            ),
            // Validation rejections keep status 200; the ok flag carries
            // the outcome.
            AppError::Chat(e @ (ChatError::EmptyMessage | ChatError::InvalidAmount)) => {
                (StatusCode::OK, json!({"ok": false, "error": e.to_string()}))
            }
            AppError::Chat(e) => {
                tracing::error!(error = %e, "unexpected chat error at HTTP boundary");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"ok": false, "error": "Internal error"}),
                )
            }
            AppError::BadRequest => (
                StatusCode::BAD_REQUEST,
                json!({"ok": false, "error": "Invalid payload"}),
            ),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                json!({"ok": false, "error": msg}),
            ),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"ok": false, "error": "Internal error"}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let resp = AppError::Chat(ChatError::InsufficientTokens { tokens: 3 }).into_response();
        assert_eq!(resp.status(), StatusCode::PAYMENT_REQUIRED);

        let resp = AppError::Chat(ChatError::EmptyMessage).into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = AppError::Chat(ChatError::InvalidAmount).into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = AppError::BadRequest.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::Unauthorized("Missing API key".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
