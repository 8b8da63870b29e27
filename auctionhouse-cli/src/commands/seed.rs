//! Demo data loader

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use auctionhouse_server::db::seed::seed;

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Database URL (overrides DATABASE_URL and DB_* variables)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Replace every row with the demo dataset
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let pool = super::connect(args.database_url).await?;
    let mut conn = pool.acquire().await.context("Failed to acquire connection")?;

    let summary = seed(&mut conn, Local::now().naive_local())
        .await
        .context("Failed to load demo data")?;

    println!(
        "Loaded {} participants, {} auctions, {} lots, {} sales",
        summary.participants, summary.auctions, summary.items, summary.sales
    );

    drop(conn);
    pool.close().await;
    Ok(())
}
