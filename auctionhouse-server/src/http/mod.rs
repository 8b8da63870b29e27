//! HTTP server layer
//!
//! Axum server with:
//! - Server-rendered HTML pages and form posts
//! - Request tracing
//! - Graceful shutdown
//! - Flash messages on redirects

pub mod error;
pub mod extractors;
pub mod flash;
pub mod render;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
