//! SQLite persistence layer.
//!
//! Raw sqlx queries against a split reader/writer pool. Each repository
//! struct implements the corresponding trait from `tokenchat-core`.

pub mod account;
pub mod message;
pub mod pool;

pub use account::SqliteAccountRepository;
pub use message::SqliteMessageRepository;
pub use pool::DatabasePool;
