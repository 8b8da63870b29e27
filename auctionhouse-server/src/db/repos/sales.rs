//! Sale repository
//!
//! Recording a sale is a single `INSERT ... ON CONFLICT DO NOTHING`, so two
//! concurrent submissions for the same item cannot both succeed.

use sqlx::{FromRow, PgConnection};

use super::DbError;
use crate::db::query::{self, SqlParam};
use crate::models::NewSale;

/// Result of trying to record a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleOutcome {
    /// Sale stored with this id
    Recorded(i32),
    /// The item already had a sale; nothing was written
    AlreadySold,
}

#[derive(FromRow)]
struct Inserted {
    id: i32,
}

const INSERT: &str = r#"
    INSERT INTO sales (item_id, buyer_id, sold_price, sold_at)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (item_id) DO NOTHING
    RETURNING id
"#;

/// Sale repository
pub struct SaleRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> SaleRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Record a sale unless the item is already sold.
    ///
    /// Unknown item or buyer ids fail with `DbError::Integrity`.
    pub async fn create(&mut self, sale: &NewSale) -> Result<SaleOutcome, DbError> {
        let params = [
            SqlParam::Int(sale.item_id),
            SqlParam::Int(sale.buyer_id),
            SqlParam::Numeric(sale.sold_price.clone()),
            SqlParam::Timestamp(sale.sold_at),
        ];
        let inserted: Option<Inserted> = query::fetch_one(&mut *self.conn, INSERT, &params).await?;

        Ok(match inserted {
            Some(row) => {
                tracing::debug!(id = row.id, item_id = sale.item_id, "sale recorded");
                SaleOutcome::Recorded(row.id)
            }
            None => {
                tracing::info!(item_id = sale.item_id, "sale rejected, item already sold");
                SaleOutcome::AlreadySold
            }
        })
    }
}
