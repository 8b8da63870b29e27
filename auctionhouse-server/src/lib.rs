//! auctionhouse-server: record keeping for an auction house
//!
//! Participants consign lots to auctions and buy them. This crate owns the
//! PostgreSQL schema, the repositories over it, period reports, and the
//! server-rendered HTTP interface.
//!
//! The `auctionctl` binary wires configuration and logging around it.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::DatabaseConfig;
pub use db::{create_pool, ensure_schema};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
