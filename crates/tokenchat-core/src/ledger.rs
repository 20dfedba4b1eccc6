//! LedgerRepository trait definition.
//!
//! Debit and credit operations over a user's token balance. The debit is
//! a conditional decrement that must be atomic per account: two
//! concurrent debits against a balance that can only afford one must not
//! both succeed, and the balance can never go negative.
//!
//! Implementations live in tokenchat-infra (e.g., `SqliteAccountRepository`,
//! which uses a single conditional UPDATE at the storage layer).

use tokenchat_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for per-user token balances.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait LedgerRepository: Send + Sync {
    /// Atomically subtract `amount` if the balance covers it.
    ///
    /// Returns `Some(new_balance)` on success, `None` when the balance is
    /// insufficient (in which case nothing changes).
    fn try_debit(
        &self,
        user_id: &Uuid,
        amount: i64,
    ) -> impl std::future::Future<Output = Result<Option<i64>, RepositoryError>> + Send;

    /// Add `amount` to the balance and return the new balance.
    ///
    /// Callers validate `amount > 0` before reaching the ledger.
    fn credit(
        &self,
        user_id: &Uuid,
        amount: i64,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;

    /// Read the current balance.
    fn balance(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;
}
