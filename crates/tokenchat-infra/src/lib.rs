//! Infrastructure implementations for Tokenchat.
//!
//! SQLite-backed repositories over sqlx (split reader/writer pools in WAL
//! mode), the reqwest-based remote generation client, and configuration
//! loading. Everything here implements traits defined in `tokenchat-core`.

pub mod config;
pub mod generation;
pub mod sqlite;
