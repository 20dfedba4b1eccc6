//! HTTP/REST API layer for Tokenchat.
//!
//! Axum-based JSON API with API key authentication and the `ok`-flag
//! response convention: user-input rejections come back as HTTP 200 with
//! `{"ok": false, "error": ...}`, while "we could not serve you" cases
//! use 4xx/5xx status codes.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
