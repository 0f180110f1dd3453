//! Database connection management

use sqlx::{Pool, Postgres};
use std::time::Duration;
use crate::utils::errors::PickBuddyError;

pub type DatabasePool = Pool<Postgres>;

/// Pool options derived from `[database]` settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
}

impl From<&crate::config::DatabaseConfig> for DatabaseConfig {
    fn from(settings: &crate::config::DatabaseConfig) -> Self {
        Self {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            acquire_timeout: Duration::from_secs(settings.acquire_timeout_secs),
            idle_timeout: settings.idle_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Create the pool and make sure the database answers
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, PickBuddyError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect(&config.url)
        .await?;

    health_check(&pool).await?;

    tracing::info!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout.as_secs(),
        "Database connection pool created"
    );
    Ok(pool)
}

/// Apply pending migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), PickBuddyError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

pub async fn health_check(pool: &DatabasePool) -> Result<(), PickBuddyError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
