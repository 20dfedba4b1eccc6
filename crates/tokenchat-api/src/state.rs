//! Application state wiring all services together.
//!
//! `AppState` holds the concrete service instances used by both the CLI
//! and the REST API. The chat service is generic over ledger/message/
//! provider traits, but AppState pins it to the concrete infra
//! implementations.

use std::sync::Arc;

use tokenchat_core::chat::ChatService;
use tokenchat_infra::config::{load_service_config, GenerationConfig};
use tokenchat_infra::generation::HttpGenerationClient;
use tokenchat_infra::sqlite::pool::default_data_dir;
use tokenchat_infra::sqlite::{DatabasePool, SqliteAccountRepository, SqliteMessageRepository};
use tokenchat_types::config::ServiceConfig;

/// Concrete type alias for the chat service pinned to infra implementations.
pub type ConcreteChatService =
    ChatService<SqliteAccountRepository, SqliteMessageRepository, HttpGenerationClient>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    /// Account store for auth lookups and user provisioning (the chat
    /// service owns its own instance over the same pool).
    pub accounts: Arc<SqliteAccountRepository>,
    pub config: ServiceConfig,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the database, load
    /// config, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = std::path::PathBuf::from(default_data_dir());
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_service_config(&data_dir).await;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("tokenchat.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let generation = GenerationConfig::from_env(&config.generation);
        Ok(Self::wire(db_pool, config, generation))
    }

    /// Wire services over an existing pool. Split out of `init` so tests
    /// can point the state at a temporary database and a stub endpoint.
    pub fn wire(
        db_pool: DatabasePool,
        config: ServiceConfig,
        generation: GenerationConfig,
    ) -> Self {
        let chat_service = ChatService::new(
            SqliteAccountRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
            HttpGenerationClient::new(generation),
        );

        Self {
            chat_service: Arc::new(chat_service),
            accounts: Arc::new(SqliteAccountRepository::new(db_pool.clone())),
            config,
            db_pool,
        }
    }
}
