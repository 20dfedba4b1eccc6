//! Token credit endpoint.
//!
//! POST /api/tokens/add/ -- mock purchase: a validated no-questions-asked
//! increment. No payment processing.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::state::AppState;

/// Request body for the token credit endpoint.
#[derive(Debug, Deserialize)]
pub struct AddTokensRequest {
    /// How many tokens to add; must be positive.
    pub amount: i64,
}

/// POST /api/tokens/add/ - Credit tokens to the caller's account.
pub async fn add_tokens(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<AddTokensRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(body) = body.map_err(|_| AppError::BadRequest)?;

    let tokens = state.chat_service.add_tokens(user.id, body.amount).await?;

    Ok(Json(json!({"ok": true, "tokens": tokens})))
}
