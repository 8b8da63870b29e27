//! Schema manager
//!
//! Creates the four auction tables if they are absent. Safe to run on every
//! start-up; there is no migration or versioning logic.

use sqlx::PgPool;

use super::repos::DbError;

/// `(auction_id, lot_number)` uniqueness
pub const ITEMS_LOT_UNIQUE: &str = "items_lot_unique";

/// At most one sale per item
pub const SALES_ITEM_UNIQUE: &str = "sales_item_unique";

/// Tables in dependency order (parents first)
const TABLES: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS participants (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        contact_info TEXT,
        notes TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS auctions (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        location TEXT NOT NULL,
        starts_at TIMESTAMP NOT NULL,
        description TEXT
    )
    "#,
    // Sellers cannot be deleted while they still have lots
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id SERIAL PRIMARY KEY,
        auction_id INTEGER NOT NULL REFERENCES auctions(id) ON DELETE CASCADE,
        seller_id INTEGER NOT NULL REFERENCES participants(id) ON DELETE RESTRICT,
        lot_number TEXT NOT NULL,
        title TEXT NOT NULL,
        start_price NUMERIC(12, 2) NOT NULL CHECK (start_price >= 0),
        description TEXT,
        CONSTRAINT items_lot_unique UNIQUE (auction_id, lot_number)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales (
        id SERIAL PRIMARY KEY,
        item_id INTEGER NOT NULL REFERENCES items(id) ON DELETE CASCADE,
        buyer_id INTEGER NOT NULL REFERENCES participants(id) ON DELETE RESTRICT,
        sold_price NUMERIC(12, 2) NOT NULL CHECK (sold_price >= 0),
        sold_at TIMESTAMP NOT NULL,
        CONSTRAINT sales_item_unique UNIQUE (item_id)
    )
    "#,
];

const INDEXES: [&str; 5] = [
    "CREATE INDEX IF NOT EXISTS idx_auctions_starts_at ON auctions(starts_at)",
    "CREATE INDEX IF NOT EXISTS idx_items_seller ON items(seller_id)",
    "CREATE INDEX IF NOT EXISTS idx_sales_buyer ON sales(buyer_id)",
    "CREATE INDEX IF NOT EXISTS idx_sales_sold_at ON sales(sold_at)",
    "CREATE INDEX IF NOT EXISTS idx_items_auction ON items(auction_id)",
];

/// Make sure every table, constraint and index exists.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DbError> {
    tracing::debug!("Ensuring auction schema");

    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::debug!("Auction schema ready");
    Ok(())
}
