//! Item (lot) repository
//!
//! Lots are immutable once created. `(auction_id, lot_number)` uniqueness is
//! left to the `items_lot_unique` constraint.

use chrono::NaiveDateTime;
use sqlx::{FromRow, PgConnection};

use super::DbError;
use crate::db::query::{self, SqlParam};
use crate::models::NewItem;

/// Item without a sale, offered as a sale candidate
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UnsoldItem {
    pub id: i32,
    pub title: String,
    pub lot_number: String,
    pub auction_name: String,
    pub starts_at: NaiveDateTime,
}

const INSERT: &str = r#"
    INSERT INTO items (auction_id, seller_id, lot_number, title, start_price, description)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id
"#;

const UNSOLD: &str = r#"
    SELECT i.id,
           i.title,
           i.lot_number,
           a.name AS auction_name,
           a.starts_at
    FROM items i
    JOIN auctions a ON a.id = i.auction_id
    LEFT JOIN sales s ON s.item_id = i.id
    WHERE s.id IS NULL
    ORDER BY a.starts_at DESC, i.lot_number, i.id
"#;

/// Item repository
pub struct ItemRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> ItemRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Insert a lot, returning its id.
    ///
    /// A repeated lot number in the same auction fails with
    /// `DbError::Conflict` on `items_lot_unique`.
    pub async fn create(&mut self, item: &NewItem) -> Result<i32, DbError> {
        let params = [
            SqlParam::Int(item.auction_id),
            SqlParam::Int(item.seller_id),
            SqlParam::from(item.lot_number.clone()),
            SqlParam::from(item.title.clone()),
            SqlParam::Numeric(item.start_price.clone()),
            SqlParam::from(item.description.clone()),
        ];
        let id = query::execute(&mut *self.conn, INSERT, &params).await?;
        tracing::debug!(id, auction_id = item.auction_id, lot = %item.lot_number, "item created");
        Ok(id)
    }

    /// Items that have no sale yet, newest auction first.
    pub async fn unsold(&mut self) -> Result<Vec<UnsoldItem>, DbError> {
        query::fetch_all(&mut *self.conn, UNSOLD, &[]).await
    }
}
