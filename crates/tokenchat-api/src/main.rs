//! Tokenchat CLI and REST API entry point.
//!
//! Binary name: `tokenchat`
//!
//! Parses CLI arguments, initializes the database and services, then
//! either starts the REST API server or runs an operator command.

mod cli;
mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,tokenchat=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    // Initialize application state (DB, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| state.config.bind_addr.clone());
            let router = http::router::build_router(state);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(addr = %addr, "tokenchat API listening");
            axum::serve(listener, router).await?;
        }

        Commands::CreateUser { username } => {
            cli::user::create_user(&state, &username).await?;
        }

        Commands::AddTokens { username, amount } => {
            cli::user::add_tokens(&state, &username, amount).await?;
        }
    }

    Ok(())
}
