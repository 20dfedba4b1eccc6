//! API key authentication extractor.
//!
//! Extracts and verifies API keys from:
//! - `Authorization: Bearer <key>` header
//! - `X-API-Key: <key>` header
//!
//! Keys are SHA-256 hashed and resolved to their owning user account via
//! the `api_keys` table.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use tokenchat_types::account::UserAccount;

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated caller. Extracting this validates the API key and
/// loads the owning account.
pub struct CurrentUser(pub UserAccount);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = extract_api_key(parts)?;
        let key_hash = hash_api_key(&api_key);

        let account = state
            .accounts
            .find_by_key_hash(&key_hash)
            .await
            .map_err(|e| AppError::Internal(format!("auth lookup failed: {e}")))?;

        match account {
            Some(account) => Ok(CurrentUser(account)),
            None => Err(AppError::Unauthorized("Invalid API key".to_string())),
        }
    }
}

/// Extract the API key from request headers.
fn extract_api_key(parts: &Parts) -> Result<String, AppError> {
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(key) = auth_str.strip_prefix("Bearer ") {
            return Ok(key.trim().to_string());
        }
    }

    if let Some(key) = parts.headers.get("x-api-key") {
        let key_str = key
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid X-API-Key header encoding".to_string()))?;
        return Ok(key_str.trim().to_string());
    }

    Err(AppError::Unauthorized(
        "Missing API key. Provide via 'Authorization: Bearer <key>' or 'X-API-Key: <key>' header."
            .to_string(),
    ))
}

/// Compute SHA-256 hash of an API key (lowercase hex).
pub fn hash_api_key(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{:x}", digest)
}

/// Generate a fresh plaintext API key (256 bits of randomness).
///
/// Shown to the user exactly once; only the hash is stored.
pub fn generate_api_key() -> String {
    format!(
        "tc_{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}
