//! Account provisioning and operator-side token credits.

use anyhow::{bail, Context};

use crate::http::extractors::auth::{generate_api_key, hash_api_key};
use crate::state::AppState;

/// Create a user account with the configured token grant and print the
/// plaintext API key. Only the hash is stored; the key cannot be
/// recovered later.
pub async fn create_user(state: &AppState, username: &str) -> anyhow::Result<()> {
    let account = state
        .accounts
        .create_user(username, state.config.token_grant)
        .await
        .with_context(|| format!("failed to create user '{username}'"))?;

    let api_key = generate_api_key();
    state
        .accounts
        .insert_api_key(&account.id, &hash_api_key(&api_key))
        .await
        .context("failed to store API key")?;

    println!("Created user '{}' with {} tokens.", account.username, account.tokens);
    println!("API key (shown once, store it now): {api_key}");
    Ok(())
}

/// Credit tokens to an account by username.
pub async fn add_tokens(state: &AppState, username: &str, amount: i64) -> anyhow::Result<()> {
    let Some(account) = state.accounts.find_by_username(username).await? else {
        bail!("no such user: '{username}'");
    };

    let tokens = state
        .chat_service
        .add_tokens(account.id, amount)
        .await
        .with_context(|| format!("failed to credit user '{username}'"))?;

    println!("User '{username}' now has {tokens} tokens.");
    Ok(())
}
