//! User account types for Tokenchat.
//!
//! The account carries the per-user token balance. The balance is only
//! ever mutated through the ledger operations (debit, credit) and never
//! goes negative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account with its spendable token balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    /// Spendable token balance. Invariant: never negative.
    pub tokens: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_serde_roundtrip() {
        let account = UserAccount {
            id: Uuid::now_v7(),
            username: "tester".to_string(),
            tokens: 100,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&account).unwrap();
        let parsed: UserAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.username, "tester");
        assert_eq!(parsed.tokens, 100);
    }
}
