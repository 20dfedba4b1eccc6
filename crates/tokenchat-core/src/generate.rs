//! GenerationProvider trait definition.
//!
//! The single abstraction over the remote text-generation service. Uses
//! native async fn in traits (RPITIT, Rust 2024 edition).
//!
//! Implementations live in tokenchat-infra (e.g., `HttpGenerationClient`).

use tokenchat_types::error::GenerationError;

/// Trait for remote text-generation backends.
///
/// A call is a single attempt: no retries. The caller decides fallback
/// behavior when the provider fails.
pub trait GenerationProvider: Send + Sync {
    /// Send a prompt and receive a plain-text reply.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, GenerationError>> + Send;
}
