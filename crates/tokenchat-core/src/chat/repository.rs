//! MessageRepository trait definition.
//!
//! Append-only persistence for chat messages, scoped per user.
//! Follows the same RPITIT pattern as `LedgerRepository`.

use tokenchat_types::chat::ChatMessage;
use tokenchat_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat message persistence.
///
/// Implementations live in tokenchat-infra (e.g., `SqliteMessageRepository`).
pub trait MessageRepository: Send + Sync {
    /// Append a message to a user's history.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// The newest `limit` messages for a user, returned in chronological
    /// ascending order.
    fn recent_messages(
        &self,
        user_id: &Uuid,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;
}
