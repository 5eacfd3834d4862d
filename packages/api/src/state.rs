// ABOUTME: Shared application state handed to every axum handler
// ABOUTME: Holds the configuration, per-resource storages and the outbound clients

use std::sync::Arc;

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

use finadvisor_ai::AIService;
use finadvisor_chat::ChatStorage;
use finadvisor_core::AppConfig;
use finadvisor_documents::DocumentStorage;
use finadvisor_finance::FinancialStorage;
use finadvisor_news::{NewsSearchClient, NewsStorage};
use finadvisor_security::UserStorage;
use finadvisor_storage::{connect, StorageConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<UserStorage>,
    pub documents: Arc<DocumentStorage>,
    pub chat: Arc<ChatStorage>,
    pub finance: Arc<FinancialStorage>,
    pub news: Arc<NewsStorage>,
    pub ai: Arc<AIService>,
    pub news_search: Arc<NewsSearchClient>,
}

impl AppState {
    /// Build state over an already-migrated pool.
    pub fn new(config: AppConfig, pool: SqlitePool) -> anyhow::Result<Self> {
        let ai = AIService::new(config.llm.clone()).context("Failed to build model client")?;
        let news_search =
            NewsSearchClient::new(config.news.clone()).context("Failed to build news search client")?;

        Ok(Self {
            users: Arc::new(UserStorage::new(pool.clone())),
            documents: Arc::new(DocumentStorage::new(pool.clone())),
            chat: Arc::new(ChatStorage::new(pool.clone())),
            finance: Arc::new(FinancialStorage::new(pool.clone())),
            news: Arc::new(NewsStorage::new(pool)),
            ai: Arc::new(ai),
            news_search: Arc::new(news_search),
            config: Arc::new(config),
        })
    }

    /// Open the configured database, run migrations and build state.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        info!("Connecting to database: {}", config.database_url);
        let pool = connect(&StorageConfig::new(config.database_url.clone()))
            .await
            .context("Failed to open database")?;

        Self::new(config, pool)
    }
}
