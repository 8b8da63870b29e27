//! Throwaway schema per test
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p auctionhouse-server -- --ignored

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use uuid::Uuid;

use auctionhouse_server::db::ensure_schema;

pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    /// Fresh schema with the auction tables, first on the search path.
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let options = PgConnectOptions::from_str(&url).expect("bad DATABASE_URL");
        let schema = format!("t_{}", Uuid::new_v4().simple());

        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .expect("admin connection failed");
        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&admin)
            .await
            .expect("create schema failed");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options.options([("search_path", schema.as_str())]))
            .await
            .expect("pool creation failed");
        ensure_schema(&pool).await.expect("schema setup failed");

        Self { pool, admin, schema }
    }

    pub async fn cleanup(self) {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("drop schema failed");
    }
}
