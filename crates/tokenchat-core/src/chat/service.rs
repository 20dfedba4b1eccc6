//! Chat service orchestrating the debit-persist-generate transaction.
//!
//! `ChatService` is the only multi-step workflow in the system with a
//! partial-failure policy. The ordering is a hard contract:
//!
//! 1. validate (trimmed message must be non-empty; no side effects on reject)
//! 2. debit one token (rejection here persists nothing)
//! 3. persist the user's turn -- a persisted user message implies a
//!    successful charge
//! 4. call the generation provider; every failure becomes the local echo
//!    fallback so the user always gets a reply for their charge
//! 5. persist the bot's turn
//!
//! Steps 3-5 never roll back step 2: a charge is not refunded when the
//! remote call fails. The debit is the only per-account critical section
//! and completes before the network call begins, so no lock is held for
//! the duration of external I/O.

use tracing::{debug, warn};
use uuid::Uuid;

use tokenchat_types::chat::{ChatMessage, ChatReply, MessageRole};
use tokenchat_types::error::ChatError;

use crate::chat::repository::MessageRepository;
use crate::generate::GenerationProvider;
use crate::ledger::LedgerRepository;

/// Token cost of a single chat message.
pub const MESSAGE_COST: i64 = 1;

/// Default number of messages returned by history listings.
pub const DEFAULT_MESSAGE_LIMIT: i64 = 50;

/// Orchestrates the token debit, message persistence, and generation call.
///
/// Generic over `LedgerRepository`, `MessageRepository`, and
/// `GenerationProvider` to maintain clean architecture (tokenchat-core
/// never depends on tokenchat-infra).
pub struct ChatService<L, M, G> {
    ledger: L,
    messages: M,
    provider: G,
}

impl<L, M, G> ChatService<L, M, G>
where
    L: LedgerRepository,
    M: MessageRepository,
    G: GenerationProvider,
{
    /// Create a new chat service over the given ledger, message
    /// repository, and generation provider.
    pub fn new(ledger: L, messages: M, provider: G) -> Self {
        Self {
            ledger,
            messages,
            provider,
        }
    }

    /// Handle a chat send: charge one token, persist both turns, and
    /// return the reply with the post-debit balance.
    pub async fn send_message(
        &self,
        user_id: Uuid,
        raw_message: &str,
    ) -> Result<ChatReply, ChatError> {
        let message = raw_message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let Some(tokens) = self.ledger.try_debit(&user_id, MESSAGE_COST).await? else {
            let tokens = self.ledger.balance(&user_id).await?;
            debug!(user_id = %user_id, tokens, "chat send rejected: insufficient tokens");
            return Err(ChatError::InsufficientTokens { tokens });
        };

        self.messages
            .save_message(&ChatMessage::new(
                user_id,
                MessageRole::User,
                message.to_string(),
            ))
            .await?;

        // Generation failures never escape: the user paid for this turn,
        // so any error degrades to the deterministic echo reply.
        let reply = match self.provider.generate(message).await {
            Ok(text) => text,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "generation call failed; using echo fallback");
                format!("Echo: {message}")
            }
        };

        self.messages
            .save_message(&ChatMessage::new(user_id, MessageRole::Bot, reply.clone()))
            .await?;

        Ok(ChatReply { reply, tokens })
    }

    /// Credit tokens to an account. Rejects non-positive amounts without
    /// touching the ledger.
    pub async fn add_tokens(&self, user_id: Uuid, amount: i64) -> Result<i64, ChatError> {
        if amount <= 0 {
            return Err(ChatError::InvalidAmount);
        }
        Ok(self.ledger.credit(&user_id, amount).await?)
    }

    /// The newest `limit` messages for a user, chronological ascending.
    pub async fn recent_messages(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.messages.recent_messages(&user_id, limit).await?)
    }

    /// Current token balance for an account.
    pub async fn balance(&self, user_id: Uuid) -> Result<i64, ChatError> {
        Ok(self.ledger.balance(&user_id).await?)
    }
}
