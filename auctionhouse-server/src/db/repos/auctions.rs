//! Auction repository
//!
//! - create: INSERT ... RETURNING id
//! - list: dynamic WHERE built from the period/location filter
//! - delete_by_name: first match by id, cascades to items and sales

use chrono::NaiveDateTime;
use sqlx::{FromRow, PgConnection};

use super::DbError;
use crate::db::query::{self, SqlParam};
use crate::models::{AuctionFilter, NewAuction};

/// Auction record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Auction {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub description: Option<String>,
}

/// Auction picker entry for the item form
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AuctionRef {
    pub id: i32,
    pub name: String,
    pub starts_at: NaiveDateTime,
}

/// Summary of an administrative delete
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DeletedAuction {
    pub id: i32,
    pub name: String,
    pub items_removed: i64,
    pub sales_removed: i64,
}

#[derive(FromRow)]
struct LocationRow {
    location: String,
}

const INSERT: &str = r#"
    INSERT INTO auctions (name, location, starts_at, description)
    VALUES ($1, $2, $3, $4)
    RETURNING id
"#;

const UPCOMING: &str = r#"
    SELECT id, name, location, starts_at, description
    FROM auctions
    ORDER BY starts_at, id
    LIMIT $1
"#;

const LIST_BASE: &str = "SELECT id, name, location, starts_at, description FROM auctions";

const LOCATIONS: &str =
    "SELECT location FROM auctions GROUP BY location ORDER BY LOWER(location), location";

const OPTIONS: &str = "SELECT id, name, starts_at FROM auctions ORDER BY starts_at DESC, id DESC";

/// Counts are taken before the delete so the caller can report the cascade
const DELETE_PREVIEW: &str = r#"
    SELECT a.id,
           a.name,
           COUNT(DISTINCT i.id) AS items_removed,
           COUNT(s.id) AS sales_removed
    FROM auctions a
    LEFT JOIN items i ON i.auction_id = a.id
    LEFT JOIN sales s ON s.item_id = i.id
    WHERE a.id = (SELECT id FROM auctions WHERE name = $1 ORDER BY id LIMIT 1)
    GROUP BY a.id, a.name
"#;

const DELETE: &str = "DELETE FROM auctions WHERE id = $1";

/// Auction repository
pub struct AuctionRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> AuctionRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Insert an auction, returning its id.
    pub async fn create(&mut self, a: &NewAuction) -> Result<i32, DbError> {
        let params: [SqlParam; 4] = [
            a.name.clone().into(),
            a.location.clone().into(),
            a.starts_at.into(),
            a.description.clone().into(),
        ];
        let id = query::execute(&mut *self.conn, INSERT, &params).await?;
        tracing::debug!(id, name = %a.name, "auction created");
        Ok(id)
    }

    /// Earliest `limit` auctions by start time.
    pub async fn upcoming(&mut self, limit: i32) -> Result<Vec<Auction>, DbError> {
        query::fetch_all(&mut *self.conn, UPCOMING, &[SqlParam::Int(limit)]).await
    }

    /// Auctions starting within the period, optionally at one location,
    /// newest first.
    pub async fn list(&mut self, filter: &AuctionFilter) -> Result<Vec<Auction>, DbError> {
        let (sql, params) = list_statement(filter);
        query::fetch_all(&mut *self.conn, &sql, &params).await
    }

    /// Distinct locations for the filter form.
    pub async fn locations(&mut self) -> Result<Vec<String>, DbError> {
        let rows: Vec<LocationRow> = query::fetch_all(&mut *self.conn, LOCATIONS, &[]).await?;
        Ok(rows.into_iter().map(|r| r.location).collect())
    }

    /// Auctions for the item form, newest first.
    pub async fn options(&mut self) -> Result<Vec<AuctionRef>, DbError> {
        query::fetch_all(&mut *self.conn, OPTIONS, &[]).await
    }

    /// Delete the first auction (lowest id) with exactly this name.
    ///
    /// Items and their sales go with it through `ON DELETE CASCADE`.
    /// Returns `None` when no auction has that name.
    pub async fn delete_by_name(&mut self, name: &str) -> Result<Option<DeletedAuction>, DbError> {
        let Some(deleted) = query::fetch_one::<_, DeletedAuction>(
            &mut *self.conn,
            DELETE_PREVIEW,
            &[SqlParam::from(name)],
        )
        .await?
        else {
            return Ok(None);
        };

        query::execute(&mut *self.conn, DELETE, &[SqlParam::Int(deleted.id)]).await?;
        tracing::info!(
            id = deleted.id,
            items = deleted.items_removed,
            sales = deleted.sales_removed,
            "auction deleted"
        );
        Ok(Some(deleted))
    }
}

/// Build the filtered list query with positional placeholders.
fn list_statement(filter: &AuctionFilter) -> (String, Vec<SqlParam>) {
    let mut params: Vec<SqlParam> = vec![filter.period.start.into(), filter.period.end.into()];
    let mut sql = format!("{LIST_BASE} WHERE starts_at::date BETWEEN $1 AND $2");

    if let Some(location) = &filter.location {
        params.push(location.clone().into());
        sql.push_str(&format!(" AND location = ${}", params.len()));
    }

    sql.push_str(" ORDER BY starts_at DESC, id DESC");
    (sql, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;
    use chrono::NaiveDate;

    fn period() -> Period {
        Period::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        )
    }

    #[test]
    fn list_without_location() {
        let (sql, params) = list_statement(&AuctionFilter {
            period: period(),
            location: None,
        });
        assert!(sql.contains("BETWEEN $1 AND $2"));
        assert!(!sql.contains("location ="));
        assert!(sql.ends_with("ORDER BY starts_at DESC, id DESC"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn list_with_location() {
        let (sql, params) = list_statement(&AuctionFilter {
            period: period(),
            location: Some("Kazan".into()),
        });
        assert!(sql.contains("AND location = $3"));
        assert_eq!(params[2], SqlParam::Text("Kazan".into()));
    }
}
