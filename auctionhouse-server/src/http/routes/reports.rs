//! Period reports
//!
//! Every report takes `?start=&end=` (inclusive dates, default trailing 30
//! days). A malformed date is a 400 page; a start after the end shows an
//! empty report.

use std::sync::Arc;

use axum::extract::Query;
use axum::response::Html;
use axum::{routing::get, Router};
use bigdecimal::BigDecimal;

use crate::db::repos::ReportRepo;
use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::http::flash::FlashParams;
use crate::http::render::{self, escape};
use crate::http::server::AppState;
use crate::models::period::today;
use crate::models::{Period, PeriodParams};

const AUCTION_REVENUE: &str = "/reports/auction-revenue";
const SOLD_ITEMS: &str = "/reports/sold-items";
const SELLER_REVENUE: &str = "/reports/seller-revenue";
const ACTIVE_BUYERS: &str = "/reports/active-buyers";
const BUYER_COUNTS: &str = "/reports/buyer-counts";
const SELLERS_PARTICIPATED: &str = "/reports/sellers-participated";

fn report_page(
    title: &str,
    path: &str,
    period: &Period,
    flash: FlashParams,
    content: String,
) -> Html<String> {
    let body = format!("{}{content}", render::period_form(path, period, ""));
    render::page(title, &flash.into_flashes(), &body)
}

/// GET /reports/auction-revenue
async fn auction_revenue(
    DbConn(mut conn): DbConn,
    Query(params): Query<PeriodParams>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let period = Period::resolve(&params, today())?;
    let auctions = ReportRepo::new(&mut *conn).auction_revenue(period).await?;

    let total: BigDecimal = auctions.iter().map(|a| &a.revenue).sum();
    let rows: Vec<Vec<String>> = auctions
        .iter()
        .map(|a| {
            vec![
                escape(&a.name),
                escape(&a.location),
                render::datetime(&a.starts_at),
                render::money(&a.revenue),
            ]
        })
        .collect();

    let content = format!(
        "{}<p>Total: {}</p>",
        render::table(
            &["Auction", "Location", "Starts", "Revenue"],
            &rows,
            "No auctions in this period.",
        ),
        render::money(&total)
    );
    Ok(report_page("Auction revenue", AUCTION_REVENUE, &period, flash, content))
}

/// GET /reports/sold-items
async fn sold_items(
    DbConn(mut conn): DbConn,
    Query(params): Query<PeriodParams>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let period = Period::resolve(&params, today())?;
    let sales = ReportRepo::new(&mut *conn).sold_items(period).await?;

    let total: BigDecimal = sales.iter().map(|s| &s.sold_price).sum();
    let rows: Vec<Vec<String>> = sales
        .iter()
        .map(|s| {
            vec![
                escape(&s.title),
                escape(&s.lot_number),
                escape(&s.auction_name),
                render::money(&s.sold_price),
                render::datetime(&s.sold_at),
                escape(&s.buyer_name),
            ]
        })
        .collect();

    let content = format!(
        "{}<p>{} sold, total {}</p>",
        render::table(
            &["Lot", "Number", "Auction", "Price", "Sold at", "Buyer"],
            &rows,
            "Nothing sold in this period.",
        ),
        sales.len(),
        render::money(&total)
    );
    Ok(report_page("Sold items", SOLD_ITEMS, &period, flash, content))
}

/// GET /reports/seller-revenue
async fn seller_revenue(
    DbConn(mut conn): DbConn,
    Query(params): Query<PeriodParams>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let period = Period::resolve(&params, today())?;
    let sellers = ReportRepo::new(&mut *conn).seller_revenue(period).await?;

    let rows: Vec<Vec<String>> = sellers
        .iter()
        .map(|s| vec![escape(&s.name), render::money(&s.total)])
        .collect();

    let content = render::table(&["Seller", "Revenue"], &rows, "No sales in this period.");
    Ok(report_page("Seller revenue", SELLER_REVENUE, &period, flash, content))
}

/// GET /reports/active-buyers
async fn active_buyers(
    DbConn(mut conn): DbConn,
    Query(params): Query<PeriodParams>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let period = Period::resolve(&params, today())?;
    let buyers = ReportRepo::new(&mut *conn).active_buyers(period).await?;

    let rows: Vec<Vec<String>> = buyers.iter().map(|b| vec![escape(&b.name)]).collect();

    let content = render::table(&["Buyer"], &rows, "No purchases in this period.");
    Ok(report_page("Active buyers", ACTIVE_BUYERS, &period, flash, content))
}

/// GET /reports/buyer-counts
async fn buyer_counts(
    DbConn(mut conn): DbConn,
    Query(params): Query<PeriodParams>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let period = Period::resolve(&params, today())?;
    let buyers = ReportRepo::new(&mut *conn).buyer_counts(period).await?;

    let rows: Vec<Vec<String>> = buyers
        .iter()
        .map(|b| vec![escape(&b.name), b.items_bought.to_string()])
        .collect();

    let content = render::table(&["Buyer", "Lots bought"], &rows, "No purchases in this period.");
    Ok(report_page("Lots per buyer", BUYER_COUNTS, &period, flash, content))
}

/// GET /reports/sellers-participated
async fn sellers_participated(
    DbConn(mut conn): DbConn,
    Query(params): Query<PeriodParams>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let period = Period::resolve(&params, today())?;
    let sellers = ReportRepo::new(&mut *conn).sellers_participated(period).await?;

    let rows: Vec<Vec<String>> = sellers.iter().map(|s| vec![escape(&s.name)]).collect();

    let content = render::table(&["Seller"], &rows, "No consigned lots in this period.");
    Ok(report_page(
        "Sellers in auctions",
        SELLERS_PARTICIPATED,
        &period,
        flash,
        content,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(AUCTION_REVENUE, get(auction_revenue))
        .route(SOLD_ITEMS, get(sold_items))
        .route(SELLER_REVENUE, get(seller_revenue))
        .route(ACTIVE_BUYERS, get(active_buyers))
        .route(BUYER_COUNTS, get(buyer_counts))
        .route(SELLERS_PARTICIPATED, get(sellers_participated))
}
