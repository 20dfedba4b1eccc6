use thiserror::Error;

/// Errors from the remote generation client.
///
/// Configuration variants are operator-fixable and carry distinct
/// messages per missing field. Network and status variants deliberately
/// carry no underlying cause or response body; those are logged
/// server-side only and never surfaced to callers.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation API key is not configured; set TOKENCHAT_API_KEY in the environment")]
    MissingApiKey,

    #[error("generation API URL is not configured; set TOKENCHAT_API_URL in the environment")]
    MissingApiUrl,

    #[error("network error")]
    Network,

    #[error("http status {0}")]
    HttpStatus(u16),
}

/// Errors from repository operations (used by trait definitions in tokenchat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the chat workflow.
///
/// Generation errors never appear here: the orchestrator converts every
/// generation failure into the fallback reply instead of propagating it.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Empty message")]
    EmptyMessage,

    #[error("Insufficient tokens")]
    InsufficientTokens {
        /// Current balance, reported back to the caller.
        tokens: i64,
    },

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
