//! Database connection and pool management
//!
//! The backend only reads client, payment, measurement and skinfold rows.
//! Migrations describe the schema those reads expect.

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Pool tuning applied on top of [`DatabaseConfig`]
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            min_connections: 1,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 300,
        }
    }
}

/// Create a PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    create_pool_with_options(config, &PoolOptions::default()).await
}

/// Create a PostgreSQL connection pool with custom tuning
pub async fn create_pool_with_options(config: &DatabaseConfig, options: &PoolOptions) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)
        .context("Invalid database URL")?
        .application_name("gym-manager");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(options.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(options.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(options.idle_timeout_secs))
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    info!(
        max = config.max_connections,
        min = options.min_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}
