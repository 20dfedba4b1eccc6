//! SQLite message repository implementation.
//!
//! Implements `MessageRepository` from `tokenchat-core` using sqlx with
//! split read/write pools. Messages are append-only; listing fetches the
//! newest `limit` rows and reverses them so callers always see
//! chronological ascending order.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use tokenchat_core::chat::MessageRepository;
use tokenchat_types::chat::{ChatMessage, MessageRole};
use tokenchat_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct MessageRow {
    id: String,
    user_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let role: MessageRole = self.role.parse().map_err(RepositoryError::Query)?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))?;

        Ok(ChatMessage {
            id,
            user_id,
            role,
            content: self.content,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// MessageRepository implementation
// ---------------------------------------------------------------------------

impl MessageRepository for SqliteMessageRepository {
    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO messages (id, user_id, role, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(message.user_id.to_string())
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(message.created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }

    async fn recent_messages(
        &self,
        user_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        // The v7 id tie-breaks messages created within the same timestamp.
        let rows = sqlx::query(
            r#"SELECT id, user_id, role, content, created_at
               FROM messages WHERE user_id = ?
               ORDER BY created_at DESC, id DESC LIMIT ?"#,
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = rows
            .iter()
            .map(|row| {
                MessageRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_message()
            })
            .collect::<Result<Vec<_>, _>>()?;
        messages.reverse();
        Ok(messages)
    }
}
