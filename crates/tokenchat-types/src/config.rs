//! Service configuration types for Tokenchat.
//!
//! `ServiceConfig` represents the top-level `config.toml` controlling the
//! token grant for new accounts, the HTTP bind address, and the remote
//! generation service parameters. All fields have sensible defaults so a
//! missing or partial file still yields a runnable service.
//!
//! Secrets (the remote API key) are never part of this file; they come
//! from the environment and live in `tokenchat-infra`.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Tokenchat service.
///
/// Loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Tokens granted to every newly created account.
    #[serde(default = "default_token_grant")]
    pub token_grant: i64,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Remote generation service tuning.
    #[serde(default)]
    pub generation: GenerationSettings,
}

/// Tuning for the remote text-generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Generation cap sent as `max_tokens` in the request body.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_token_grant() -> i64 {
    100
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            token_grant: default_token_grant(),
            bind_addr: default_bind_addr(),
            generation: GenerationSettings::default(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
