//! Chat message and reply types for Tokenchat.
//!
//! Messages are append-only records owned by exactly one user and ordered
//! by `created_at` within that user's history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a chat message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'bot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Bot,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "bot" => Ok(MessageRole::Bot),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a user's chat history.
///
/// Every accepted chat send produces exactly two of these: the user's
/// turn followed by the bot's turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a new message with a time-sortable id and the current timestamp.
    pub fn new(user_id: Uuid, role: MessageRole, content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            role,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of a successful chat send: the bot's reply and the caller's
/// post-debit token balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub tokens: i64,
}
