//! SQLite account repository: user provisioning, API keys, and the token ledger.
//!
//! Implements `LedgerRepository` from `tokenchat-core`. The debit is a
//! single conditional UPDATE (`... SET tokens = tokens - ? WHERE id = ?
//! AND tokens >= ?`): the row count tells success apart from an
//! insufficient balance, and the single-connection writer pool serializes
//! concurrent debits so two sends can never both spend the last token.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use tokenchat_core::ledger::LedgerRepository;
use tokenchat_types::account::UserAccount;
use tokenchat_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed account store and `LedgerRepository` implementation.
pub struct SqliteAccountRepository {
    pool: DatabasePool,
}

impl SqliteAccountRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Provision a new account with the given starting token grant.
    pub async fn create_user(
        &self,
        username: &str,
        token_grant: i64,
    ) -> Result<UserAccount, RepositoryError> {
        let account = UserAccount {
            id: Uuid::now_v7(),
            username: username.to_string(),
            tokens: token_grant,
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO users (id, username, tokens, created_at) VALUES (?, ?, ?, ?)")
            .bind(account.id.to_string())
            .bind(&account.username)
            .bind(account.tokens)
            .bind(format_datetime(&account.created_at))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    RepositoryError::Conflict(format!("username '{username}' already exists"))
                }
                other => RepositoryError::Query(other.to_string()),
            })?;

        Ok(account)
    }

    /// Look up an account by id.
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserAccount>, RepositoryError> {
        let row = sqlx::query("SELECT id, username, tokens, created_at FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    /// Look up an account by username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, RepositoryError> {
        let row =
            sqlx::query("SELECT id, username, tokens, created_at FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    /// Resolve the account owning an API key, given the key's SHA-256 hash.
    ///
    /// Touches `last_used_at` best effort; a failure there never fails the
    /// lookup.
    pub async fn find_by_key_hash(
        &self,
        key_hash: &str,
    ) -> Result<Option<UserAccount>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT u.id, u.username, u.tokens, u.created_at
               FROM users u JOIN api_keys k ON k.user_id = u.id
               WHERE k.key_hash = ?"#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let account = account_from_row(&row)?;

        let _ = sqlx::query("UPDATE api_keys SET last_used_at = ? WHERE key_hash = ?")
            .bind(format_datetime(&Utc::now()))
            .bind(key_hash)
            .execute(&self.pool.writer)
            .await;

        Ok(Some(account))
    }

    /// Store the hash of a freshly generated API key for a user.
    pub async fn insert_api_key(
        &self,
        user_id: &Uuid,
        key_hash: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO api_keys (id, user_id, key_hash, created_at) VALUES (?, ?, ?, ?)")
            .bind(Uuid::now_v7().to_string())
            .bind(user_id.to_string())
            .bind(key_hash)
            .bind(format_datetime(&Utc::now()))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }
}

fn account_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<UserAccount, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let username: String = row
        .try_get("username")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let tokens: i64 = row
        .try_get("tokens")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(UserAccount {
        id: Uuid::parse_str(&id)
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
        username,
        tokens,
        created_at: parse_datetime(&created_at)?,
    })
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// LedgerRepository implementation
// ---------------------------------------------------------------------------

impl LedgerRepository for SqliteAccountRepository {
    async fn try_debit(
        &self,
        user_id: &Uuid,
        amount: i64,
    ) -> Result<Option<i64>, RepositoryError> {
        // Conditional decrement; zero rows affected means the balance
        // could not cover the amount.
        let result = sqlx::query("UPDATE users SET tokens = tokens - ?2 WHERE id = ?1 AND tokens >= ?2")
            .bind(user_id.to_string())
            .bind(amount)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(self.balance(user_id).await?))
    }

    async fn credit(&self, user_id: &Uuid, amount: i64) -> Result<i64, RepositoryError> {
        let result = sqlx::query("UPDATE users SET tokens = tokens + ?2 WHERE id = ?1")
            .bind(user_id.to_string())
            .bind(amount)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.balance(user_id).await
    }

    async fn balance(&self, user_id: &Uuid) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT tokens FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => row
                .try_get("tokens")
                .map_err(|e| RepositoryError::Query(e.to_string())),
            None => Err(RepositoryError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn test_repo() -> (tempfile::TempDir, SqliteAccountRepository) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteAccountRepository::new(pool))
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let (_dir, repo) = test_repo().await;
        let created = repo.create_user("tester", 100).await.unwrap();
        assert_eq!(created.tokens, 100);

        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.username, "tester");
        assert_eq!(found.tokens, 100);

        let by_name = repo.find_by_username("tester").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let (_dir, repo) = test_repo().await;
        repo.create_user("tester", 100).await.unwrap();
        let err = repo.create_user("tester", 100).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_debit_and_credit() {
        let (_dir, repo) = test_repo().await;
        let user = repo.create_user("tester", 2).await.unwrap();

        assert_eq!(repo.try_debit(&user.id, 1).await.unwrap(), Some(1));
        assert_eq!(repo.try_debit(&user.id, 1).await.unwrap(), Some(0));
        assert_eq!(repo.try_debit(&user.id, 1).await.unwrap(), None);
        assert_eq!(repo.balance(&user.id).await.unwrap(), 0);

        assert_eq!(repo.credit(&user.id, 5).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_credit_unknown_user_is_not_found() {
        let (_dir, repo) = test_repo().await;
        let err = repo.credit(&Uuid::now_v7(), 5).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_concurrent_debits_exactly_one_succeeds() {
        let (_dir, repo) = test_repo().await;
        let repo = Arc::new(repo);
        let user = repo.create_user("racer", 1).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..2 {
            let repo = Arc::clone(&repo);
            let user_id = user.id;
            handles.push(tokio::spawn(async move {
                repo.try_debit(&user_id, 1).await.unwrap()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(repo.balance(&user.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_api_key_lookup() {
        let (_dir, repo) = test_repo().await;
        let user = repo.create_user("tester", 100).await.unwrap();
        repo.insert_api_key(&user.id, "deadbeef").await.unwrap();

        let found = repo.find_by_key_hash("deadbeef").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(repo.find_by_key_hash("cafebabe").await.unwrap().is_none());
    }
}
