//! CLI command definitions for the `tokenchat` binary.
//!
//! Uses clap derive macros for argument parsing. Account provisioning and
//! operator-side token credits live here; everything user-facing goes
//! through the REST API.

pub mod user;

use clap::{Parser, Subcommand};

/// Token-metered chat service.
#[derive(Parser)]
#[command(name = "tokenchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Bind address, overriding `bind_addr` from config.toml.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Provision a user account and print its API key (shown once).
    CreateUser {
        /// Unique username for the new account.
        username: String,
    },

    /// Credit tokens to an existing account.
    AddTokens {
        /// Username of the account to credit.
        username: String,
        /// How many tokens to add; must be positive.
        amount: i64,
    },
}
