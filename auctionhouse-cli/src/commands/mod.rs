//! Command implementations for auctionctl

use anyhow::{Context, Result};
use sqlx::PgPool;

use auctionhouse_server::db::{create_pool, ensure_schema};
use auctionhouse_server::DatabaseConfig;

pub mod delete_auction;
pub mod seed;
pub mod serve;

// Re-export main dispatcher functions for flat access from main.rs
pub use delete_auction::run_delete_auction;
pub use seed::run_seed;
pub use serve::run_serve;

/// Open the pool and make sure the tables exist.
///
/// `database_url` overrides the environment configuration.
pub async fn connect(database_url: Option<String>) -> Result<PgPool> {
    let config = DatabaseConfig::from_env().with_url(database_url);
    tracing::debug!(?config, "database configuration");

    let options = config
        .connect_options()
        .context("Invalid database configuration")?;
    let pool = create_pool(options)
        .await
        .with_context(|| format!("Failed to connect to {}", config.target()))?;

    ensure_schema(&pool)
        .await
        .context("Failed to create auction tables")?;
    Ok(pool)
}
