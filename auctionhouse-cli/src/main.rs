//! auctionctl - auction house records
//!
//! - `serve`: run the web interface
//! - `delete-auction`: remove an auction with its lots and sales
//! - `seed`: replace all data with the demo dataset
//!
//! Database settings come from `DATABASE_URL` or `DB_HOST`/`DB_PORT`/
//! `DB_NAME`/`DB_USER`/`DB_PASSWORD`, optionally via a `.env` file.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "auctionctl",
    author,
    version,
    about = "Auction house records: participants, auctions, lots, sales and reports"
)]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP interface
    Serve(commands::serve::ServeArgs),
    /// Delete the first auction with this name, cascading to lots and sales
    DeleteAuction(commands::delete_auction::DeleteAuctionArgs),
    /// Wipe all tables and load the demo dataset
    Seed(commands::seed::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::DeleteAuction(args) => commands::run_delete_auction(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
    }
    Ok(())
}
