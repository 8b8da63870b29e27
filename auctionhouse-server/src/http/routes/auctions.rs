//! Auction list and create form

use std::sync::Arc;

use axum::extract::{Form, Query};
use axum::response::{Html, Redirect};
use axum::{routing::get, Router};
use sqlx::Connection;

use crate::db::repos::AuctionRepo;
use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::http::flash::{self, Flash, FlashParams};
use crate::http::render::{self, escape};
use crate::http::server::AppState;
use crate::models::period::today;
use crate::models::{AuctionFilter, AuctionForm, AuctionListParams};

const LIST_PATH: &str = "/auctions";
const ADD_PATH: &str = "/auctions/add";

/// GET /auctions?start=&end=&location=
async fn list_auctions(
    DbConn(mut conn): DbConn,
    Query(params): Query<AuctionListParams>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let filter = AuctionFilter::resolve(&params, today())?;

    let mut repo = AuctionRepo::new(&mut *conn);
    let auctions = repo.list(&filter).await?;
    let locations = repo.locations().await?;

    let options: Vec<(String, String)> = locations.into_iter().map(|l| (l.clone(), l)).collect();
    let location_select = render::select(
        "Location",
        "location",
        &options,
        filter.location.as_deref(),
        false,
    );

    let rows: Vec<Vec<String>> = auctions
        .iter()
        .map(|a| {
            vec![
                escape(&a.name),
                escape(&a.location),
                render::datetime(&a.starts_at),
                escape(a.description.as_deref().unwrap_or("")),
            ]
        })
        .collect();

    let body = format!(
        "{}<p><a href=\"{ADD_PATH}\">New auction</a></p>{}",
        render::period_form(LIST_PATH, &filter.period, &location_select),
        render::table(
            &["Name", "Location", "Starts", "Description"],
            &rows,
            "No auctions in this period.",
        ),
    );

    Ok(render::page("Auctions", &flash.into_flashes(), &body))
}

/// GET /auctions/add
async fn add_auction_form(Query(flash): Query<FlashParams>) -> Html<String> {
    let fields = [
        render::input("Name", "name", "text", "", true),
        render::input("Location", "location", "text", "", true),
        render::input("Starts at", "starts_at", "datetime-local", "", true),
        render::textarea("Description", "description", ""),
    ]
    .concat();

    render::page(
        "New auction",
        &flash.into_flashes(),
        &render::post_form(ADD_PATH, &fields, "Create"),
    )
}

/// POST /auctions/add
async fn add_auction(
    DbConn(mut conn): DbConn,
    Form(form): Form<AuctionForm>,
) -> Result<Redirect, ApiError> {
    let auction = form.validate().map_err(ApiError::form(ADD_PATH))?;

    let mut tx = conn.begin().await?;
    let id = AuctionRepo::new(&mut *tx).create(&auction).await?;
    tx.commit().await?;

    tracing::info!(id, name = %auction.name, "auction created");
    Ok(flash::redirect(
        LIST_PATH,
        Flash::success(format!("Auction \"{}\" added", auction.name)),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(LIST_PATH, get(list_auctions))
        .route(ADD_PATH, get(add_auction_form).post(add_auction))
}
