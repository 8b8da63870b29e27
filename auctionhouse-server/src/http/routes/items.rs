//! Lot creation form

use std::sync::Arc;

use axum::extract::{Form, Query};
use axum::response::{Html, Redirect};
use axum::{routing::get, Router};
use sqlx::Connection;

use crate::db::repos::{AuctionRepo, DbError, ItemRepo, ParticipantRepo};
use crate::db::schema::ITEMS_LOT_UNIQUE;
use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::http::flash::{self, Flash, FlashParams};
use crate::http::render;
use crate::http::server::AppState;
use crate::models::ItemForm;

const ADD_PATH: &str = "/items/add";

/// GET /items/add
async fn add_item_form(
    DbConn(mut conn): DbConn,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let auctions = AuctionRepo::new(&mut *conn).options().await?;
    let sellers = ParticipantRepo::new(&mut *conn).options().await?;
    let mut flashes = flash.into_flashes();

    if auctions.is_empty() || sellers.is_empty() {
        let missing = if auctions.is_empty() {
            "Create an auction before adding lots."
        } else {
            "Add a participant to act as seller before adding lots."
        };
        flashes.push(Flash::warning(missing));
        let body = "<p><a href=\"/auctions/add\">New auction</a> | \
<a href=\"/participants\">Participants</a></p>";
        return Ok(render::page("New lot", &flashes, body));
    }

    let auction_options: Vec<(String, String)> = auctions
        .iter()
        .map(|a| {
            (
                a.id.to_string(),
                format!("{} ({})", a.name, render::datetime(&a.starts_at)),
            )
        })
        .collect();
    let seller_options: Vec<(String, String)> = sellers
        .into_iter()
        .map(|p| (p.id.to_string(), p.name))
        .collect();

    let fields = [
        render::select("Auction", "auction_id", &auction_options, None, true),
        render::select("Seller", "seller_id", &seller_options, None, true),
        render::input("Lot number", "lot_number", "text", "", true),
        render::input("Title", "title", "text", "", true),
        render::price_input("Start price", "start_price"),
        render::textarea("Description", "description", ""),
    ]
    .concat();

    Ok(render::page(
        "New lot",
        &flashes,
        &render::post_form(ADD_PATH, &fields, "Add lot"),
    ))
}

/// POST /items/add
async fn add_item(
    DbConn(mut conn): DbConn,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, ApiError> {
    let item = form.validate().map_err(ApiError::form(ADD_PATH))?;

    let mut tx = conn.begin().await?;
    let id = match ItemRepo::new(&mut *tx).create(&item).await {
        Ok(id) => id,
        Err(e) if e.is_conflict_on(ITEMS_LOT_UNIQUE) => {
            return Err(ApiError::rejected(
                ADD_PATH,
                format!(
                    "Lot number {} is already used in this auction",
                    item.lot_number
                ),
            ));
        }
        Err(DbError::Integrity { constraint }) => {
            tracing::warn!(%constraint, "lot rejected");
            return Err(ApiError::rejected(
                ADD_PATH,
                "The selected auction or seller no longer exists",
            ));
        }
        Err(e) => return Err(e.into()),
    };
    tx.commit().await?;

    tracing::info!(id, auction_id = item.auction_id, lot = %item.lot_number, "lot created");
    Ok(flash::redirect(
        "/auctions",
        Flash::success(format!("Lot {} \"{}\" added", item.lot_number, item.title)),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(ADD_PATH, get(add_item_form).post(add_item))
}
