//! Service configuration loading.
//!
//! `config.toml` in the data directory controls non-secret settings and
//! degrades to defaults when missing or malformed. Secrets (the remote
//! generation API key) come from the environment only and are wrapped in
//! [`secrecy::SecretString`] so they never land in Debug output or logs.

use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;

use tokenchat_types::config::{GenerationSettings, ServiceConfig};

/// Environment variable holding the remote generation API key.
pub const API_KEY_ENV: &str = "TOKENCHAT_API_KEY";

/// Environment variable holding the remote generation endpoint URL.
pub const API_URL_ENV: &str = "TOKENCHAT_API_URL";

/// Load service configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_service_config(data_dir: &Path) -> ServiceConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    }
}

/// Remote generation client configuration.
///
/// Key and URL are optional here: their absence is a configuration error
/// surfaced at call time (per missing field), not at startup, so a
/// misconfigured deployment still serves chat via the echo fallback.
#[derive(Clone)]
pub struct GenerationConfig {
    pub api_key: Option<SecretString>,
    pub api_url: Option<String>,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl GenerationConfig {
    /// Build the generation config from the environment plus the tuning
    /// section of `config.toml`. Empty env values count as absent.
    pub fn from_env(settings: &GenerationSettings) -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(SecretString::from);
        let api_url = std::env::var(API_URL_ENV).ok().filter(|v| !v.is_empty());

        Self {
            api_key,
            api_url,
            max_tokens: settings.max_tokens,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_service_config(tmp.path()).await;
        assert_eq!(config.token_grant, 100);
        assert_eq!(config.generation.max_tokens, 512);
    }

    #[tokio::test]
    async fn test_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
token_grant = 42
bind_addr = "0.0.0.0:9000"

[generation]
max_tokens = 128
"#,
        )
        .await
        .unwrap();

        let config = load_service_config(tmp.path()).await;
        assert_eq!(config.token_grant, 42);
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.generation.max_tokens, 128);
        assert_eq!(config.generation.timeout_secs, 10);
    }

    #[tokio::test]
    async fn test_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_service_config(tmp.path()).await;
        assert_eq!(config.token_grant, 100);
    }
}
