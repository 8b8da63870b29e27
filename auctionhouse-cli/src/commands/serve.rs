//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use auctionhouse_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Database URL (overrides DATABASE_URL and DB_* variables)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Run the HTTP server until Ctrl+C
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let pool = super::connect(args.database_url).await?;

    tracing::info!("Starting auction house on http://{}", args.bind);
    let config = ServerConfig {
        bind_addr: args.bind,
    };

    // Run server (blocks until shutdown)
    run_server(pool.clone(), config)
        .await
        .context("Server error")?;

    pool.close().await;
    Ok(())
}
