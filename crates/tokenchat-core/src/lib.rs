//! Business logic and repository trait definitions for Tokenchat.
//!
//! This crate defines the "ports" (ledger, message repository, generation
//! provider traits) that the infrastructure layer implements, plus the
//! chat orchestration service. It depends only on `tokenchat-types` --
//! never on `tokenchat-infra` or any database/IO crate.

pub mod chat;
pub mod extract;
pub mod generate;
pub mod ledger;
