// ABOUTME: Shared persistence layer for the Financial Advisor API
// ABOUTME: Owns the SQLite pool setup, embedded migrations and the common StorageError

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Password hashing error: {0}")]
    Hashing(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Pool configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout_seconds: u64,
}

impl StorageConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 5,
            busy_timeout_seconds: 10,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Open a pool for the configured database and bring the schema up to date.
pub async fn connect(config: &StorageConfig) -> StorageResult<SqlitePool> {
    debug!("Opening database at: {}", config.database_url);

    let mut options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_seconds));

    let mut pool_options = SqlitePoolOptions::new();

    if config.is_in_memory() {
        // Each in-memory connection is its own database, so pin the pool to one.
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        options = options.journal_mode(SqliteJournalMode::Wal);
        pool_options = pool_options.max_connections(config.max_connections);
    }

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(config.busy_timeout_seconds))
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Run the embedded migrations against an existing pool.
pub async fn migrate(pool: &SqlitePool) -> StorageResult<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(StorageError::Migration)?;

    Ok(())
}

/// Fresh, migrated in-memory database. Used by tests across the workspace.
pub async fn open_in_memory() -> StorageResult<SqlitePool> {
    connect(&StorageConfig::new("sqlite::memory:")).await
}
