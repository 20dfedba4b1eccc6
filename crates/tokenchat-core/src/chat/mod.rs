//! Chat message persistence and orchestration for Tokenchat.
//!
//! This module defines the `MessageRepository` trait that the
//! infrastructure layer implements, and the `ChatService` that ties the
//! ledger debit, message persistence, and generation call into the one
//! multi-step transaction the system has.

pub mod repository;
pub mod service;

pub use repository::MessageRepository;
pub use service::ChatService;
