//! Remote text-generation service client.

pub mod client;

pub use client::HttpGenerationClient;
