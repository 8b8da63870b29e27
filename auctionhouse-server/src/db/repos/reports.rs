//! Reporting queries
//!
//! Read-only aggregates over the four tables. Every period comparison casts
//! the timestamp to a date, so both bounds are inclusive and time of day is
//! ignored.

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgConnection};

use super::{Auction, DbError, ParticipantRef};
use crate::db::query::{self, SqlParam};
use crate::models::Period;

/// Number of rows in the dashboard lists
pub const DASHBOARD_LIMIT: i32 = 5;

/// Dashboard counters
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DashboardTotals {
    pub auctions: i64,
    pub participants: i64,
    pub items: i64,
    pub sales: i64,
    pub revenue: BigDecimal,
}

/// Seller with summed sale prices
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SellerTotal {
    pub id: i32,
    pub name: String,
    pub total: BigDecimal,
}

/// Auction with summed sale prices of its lots
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AuctionRevenue {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub revenue: BigDecimal,
}

/// One row per sale
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SoldItem {
    pub title: String,
    pub lot_number: String,
    pub auction_name: String,
    pub sold_price: BigDecimal,
    pub sold_at: NaiveDateTime,
    pub buyer_name: String,
}

/// Buyer with number of items bought
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BuyerCount {
    pub id: i32,
    pub name: String,
    pub items_bought: i64,
}

const TOTALS: &str = r#"
    SELECT (SELECT COUNT(*) FROM auctions) AS auctions,
           (SELECT COUNT(*) FROM participants) AS participants,
           (SELECT COUNT(*) FROM items) AS items,
           (SELECT COUNT(*) FROM sales) AS sales,
           (SELECT COALESCE(SUM(sold_price), 0) FROM sales) AS revenue
"#;

const TOP_SELLERS: &str = r#"
    SELECT p.id, p.name, SUM(s.sold_price) AS total
    FROM participants p
    JOIN items i ON i.seller_id = p.id
    JOIN sales s ON s.item_id = i.id
    GROUP BY p.id, p.name
    ORDER BY total DESC, p.name
    LIMIT $1
"#;

const AUCTION_REVENUE: &str = r#"
    SELECT a.id,
           a.name,
           a.location,
           a.starts_at,
           COALESCE(SUM(s.sold_price), 0) AS revenue
    FROM auctions a
    LEFT JOIN items i ON i.auction_id = a.id
    LEFT JOIN sales s ON s.item_id = i.id
    WHERE a.starts_at::date BETWEEN $1 AND $2
    GROUP BY a.id, a.name, a.location, a.starts_at
    ORDER BY revenue DESC, a.starts_at DESC
"#;

const SOLD_ITEMS: &str = r#"
    SELECT i.title,
           i.lot_number,
           a.name AS auction_name,
           s.sold_price,
           s.sold_at,
           buyers.name AS buyer_name
    FROM sales s
    JOIN items i ON i.id = s.item_id
    JOIN auctions a ON a.id = i.auction_id
    JOIN participants buyers ON buyers.id = s.buyer_id
    WHERE s.sold_at::date BETWEEN $1 AND $2
    ORDER BY s.sold_at DESC, s.id DESC
"#;

const SELLER_REVENUE: &str = r#"
    SELECT sellers.id,
           sellers.name,
           COALESCE(SUM(s.sold_price), 0) AS total
    FROM participants sellers
    JOIN items i ON i.seller_id = sellers.id
    JOIN sales s ON s.item_id = i.id
    WHERE s.sold_at::date BETWEEN $1 AND $2
    GROUP BY sellers.id, sellers.name
    ORDER BY total DESC, sellers.name
"#;

const ACTIVE_BUYERS: &str = r#"
    SELECT DISTINCT buyers.id, buyers.name
    FROM participants buyers
    JOIN sales s ON s.buyer_id = buyers.id
    WHERE s.sold_at::date BETWEEN $1 AND $2
    ORDER BY buyers.name, buyers.id
"#;

const BUYER_COUNTS: &str = r#"
    SELECT buyers.id, buyers.name, COUNT(s.id) AS items_bought
    FROM participants buyers
    JOIN sales s ON s.buyer_id = buyers.id
    WHERE s.sold_at::date BETWEEN $1 AND $2
    GROUP BY buyers.id, buyers.name
    ORDER BY items_bought DESC, buyers.name
"#;

const SELLERS_PARTICIPATED: &str = r#"
    SELECT DISTINCT sellers.id, sellers.name
    FROM participants sellers
    JOIN items i ON i.seller_id = sellers.id
    JOIN auctions a ON a.id = i.auction_id
    WHERE a.starts_at::date BETWEEN $1 AND $2
    ORDER BY sellers.name, sellers.id
"#;

/// Report repository
pub struct ReportRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> ReportRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Earliest auctions by start time.
    pub async fn upcoming_auctions(&mut self) -> Result<Vec<Auction>, DbError> {
        super::AuctionRepo::new(&mut *self.conn).upcoming(DASHBOARD_LIMIT).await
    }

    /// Row counts and total revenue; all zero on an empty store.
    pub async fn totals(&mut self) -> Result<DashboardTotals, DbError> {
        query::fetch_one(&mut *self.conn, TOTALS, &[])
            .await?
            .ok_or(DbError::Sqlx(sqlx::Error::RowNotFound))
    }

    /// Sellers with the highest all-time sale totals.
    pub async fn top_sellers(&mut self) -> Result<Vec<SellerTotal>, DbError> {
        query::fetch_all(&mut *self.conn, TOP_SELLERS, &[SqlParam::Int(DASHBOARD_LIMIT)]).await
    }

    /// Revenue per auction starting in the period, zero for auctions
    /// without sales.
    pub async fn auction_revenue(
        &mut self,
        period: Period,
    ) -> Result<Vec<AuctionRevenue>, DbError> {
        self.by_period(AUCTION_REVENUE, period).await
    }

    /// Every sale made in the period, latest first.
    pub async fn sold_items(&mut self, period: Period) -> Result<Vec<SoldItem>, DbError> {
        self.by_period(SOLD_ITEMS, period).await
    }

    /// Revenue per seller from sales made in the period.
    pub async fn seller_revenue(&mut self, period: Period) -> Result<Vec<SellerTotal>, DbError> {
        self.by_period(SELLER_REVENUE, period).await
    }

    /// Distinct buyers with a purchase in the period, alphabetical.
    pub async fn active_buyers(&mut self, period: Period) -> Result<Vec<ParticipantRef>, DbError> {
        self.by_period(ACTIVE_BUYERS, period).await
    }

    /// Items bought per buyer in the period.
    pub async fn buyer_counts(&mut self, period: Period) -> Result<Vec<BuyerCount>, DbError> {
        self.by_period(BUYER_COUNTS, period).await
    }

    /// Distinct sellers with lots in auctions starting in the period.
    pub async fn sellers_participated(
        &mut self,
        period: Period,
    ) -> Result<Vec<ParticipantRef>, DbError> {
        self.by_period(SELLERS_PARTICIPATED, period).await
    }

    async fn by_period<T>(&mut self, statement: &str, period: Period) -> Result<Vec<T>, DbError>
    where
        T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let params = [SqlParam::Date(period.start), SqlParam::Date(period.end)];
        query::fetch_all(&mut *self.conn, statement, &params).await
    }
}
