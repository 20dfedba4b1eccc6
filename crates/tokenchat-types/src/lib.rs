//! Shared domain types for Tokenchat.
//!
//! This crate contains the core domain types used across the Tokenchat
//! service: user accounts, chat messages, configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod account;
pub mod chat;
pub mod config;
pub mod error;
