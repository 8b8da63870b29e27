//! Dashboard: totals, upcoming auctions, top sellers

use std::sync::Arc;

use axum::extract::Query;
use axum::response::Html;
use axum::{routing::get, Router};

use crate::db::repos::ReportRepo;
use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::http::flash::FlashParams;
use crate::http::render::{self, escape};
use crate::http::server::AppState;

/// GET /
async fn dashboard(
    DbConn(mut conn): DbConn,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let mut reports = ReportRepo::new(&mut *conn);
    let totals = reports.totals().await?;
    let upcoming = reports.upcoming_auctions().await?;
    let sellers = reports.top_sellers().await?;

    let counters = format!(
        "<ul><li>Auctions: {}</li><li>Participants: {}</li><li>Lots: {}</li>\
<li>Sales: {}</li><li>Revenue: {}</li></ul>",
        totals.auctions,
        totals.participants,
        totals.items,
        totals.sales,
        render::money(&totals.revenue)
    );

    let upcoming_rows: Vec<Vec<String>> = upcoming
        .iter()
        .map(|a| {
            vec![
                escape(&a.name),
                escape(&a.location),
                render::datetime(&a.starts_at),
            ]
        })
        .collect();

    let seller_rows: Vec<Vec<String>> = sellers
        .iter()
        .map(|s| vec![escape(&s.name), render::money(&s.total)])
        .collect();

    let body = format!(
        "{counters}<h2>Upcoming auctions</h2>{}<h2>Top sellers</h2>{}",
        render::table(&["Name", "Location", "Starts"], &upcoming_rows, "No auctions yet."),
        render::table(&["Seller", "Total"], &seller_rows, "No sales yet."),
    );

    Ok(render::page("Dashboard", &flash.into_flashes(), &body))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(dashboard))
}
