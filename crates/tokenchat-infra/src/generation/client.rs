//! HttpGenerationClient -- concrete [`GenerationProvider`] over HTTP.
//!
//! Sends a prompt to the configured endpoint as a JSON POST with bearer
//! authentication and hands the decoded body to the shape-sniffing
//! extractor. One attempt per call, no retries; the caller owns fallback
//! behavior.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output. Failure details (the transport
//! cause, non-2xx response bodies) are logged here and never surfaced to
//! callers.

use secrecy::ExposeSecret;
use tracing::error;

use tokenchat_core::extract::reply_text;
use tokenchat_core::generate::GenerationProvider;
use tokenchat_types::error::GenerationError;

use crate::config::GenerationConfig;

/// How much of an error response body to keep in the log.
const LOG_BODY_LIMIT: usize = 200;

/// HTTP client for the remote generation service.
// Intentionally does NOT derive Debug: the config holds the API key.
pub struct HttpGenerationClient {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl HttpGenerationClient {
    /// Create a new client. Key/URL presence is checked per call, not
    /// here, so a misconfigured deployment still starts.
    pub fn new(config: GenerationConfig) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to create reqwest client");
        Self { client, config }
    }
}

impl GenerationProvider for HttpGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(GenerationError::MissingApiKey)?;
        let api_url = self
            .config
            .api_url
            .as_deref()
            .ok_or(GenerationError::MissingApiUrl)?;

        let payload = serde_json::json!({
            "prompt": prompt,
            "max_tokens": self.config.max_tokens,
        });

        let response = self
            .client
            .post(api_url)
            .bearer_auth(api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.config.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "network error calling generation service");
                GenerationError::Network
            })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(LOG_BODY_LIMIT).collect();
            error!(status = status.as_u16(), body = %snippet, "generation service returned error status");
            return Err(GenerationError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, "failed reading generation response body");
            GenerationError::Network
        })?;

        // The service may answer plain text; an undecodable body is the
        // reply verbatim, not an error.
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(decoded) => Ok(reply_text(&decoded)),
            Err(_) => Ok(body),
        }
    }
}
