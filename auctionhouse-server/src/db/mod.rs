//! Database layer - pool, schema, query primitives and repositories
//!
//! # Design Principles
//!
//! - Connection pool, one connection per request - no shared mutable state
//! - Hand-written SQL through four primitives (fetch_all, fetch_one, execute,
//!   execute_batch) - no ORM
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - One transaction per mutating request

pub mod pool;
pub mod query;
pub mod repos;
pub mod schema;
pub mod seed;

pub use pool::{create_pool, create_pool_with_options};
pub use query::SqlParam;
pub use repos::*;
pub use schema::ensure_schema;
