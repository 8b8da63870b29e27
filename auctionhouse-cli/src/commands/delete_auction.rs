//! Administrative auction removal

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::Connection;

use auctionhouse_server::db::repos::AuctionRepo;

#[derive(Parser, Debug)]
pub struct DeleteAuctionArgs {
    /// Exact auction name; the oldest match is removed
    pub name: String,

    /// Database URL (overrides DATABASE_URL and DB_* variables)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Delete one auction and report what went with it.
///
/// An unknown name is reported, not treated as a failure.
pub async fn run_delete_auction(args: DeleteAuctionArgs) -> Result<()> {
    let pool = super::connect(args.database_url).await?;
    let mut conn = pool.acquire().await.context("Failed to acquire connection")?;

    let mut tx = conn.begin().await?;
    let deleted = AuctionRepo::new(&mut tx)
        .delete_by_name(&args.name)
        .await
        .with_context(|| format!("Failed to delete auction {:?}", args.name))?;
    tx.commit().await?;

    match deleted {
        Some(d) => println!(
            "Deleted auction \"{}\" (id {}): {} lots, {} sales removed",
            d.name, d.id, d.items_removed, d.sales_removed
        ),
        None => println!("Auction \"{}\" not found", args.name),
    }

    drop(conn);
    pool.close().await;
    Ok(())
}
