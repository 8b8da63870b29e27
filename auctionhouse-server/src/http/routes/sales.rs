//! Sale recording form

use std::sync::Arc;

use axum::extract::{Form, Query};
use axum::response::{Html, Redirect};
use axum::{routing::get, Router};
use sqlx::Connection;

use crate::db::repos::{DbError, ItemRepo, ParticipantRepo, SaleOutcome, SaleRepo};
use crate::http::error::ApiError;
use crate::http::extractors::DbConn;
use crate::http::flash::{self, Flash, FlashParams};
use crate::http::render;
use crate::http::server::AppState;
use crate::models::SaleForm;

const ADD_PATH: &str = "/sales/add";
const ALREADY_SOLD: &str = "This lot has already been sold";

/// GET /sales/add
async fn add_sale_form(
    DbConn(mut conn): DbConn,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let items = ItemRepo::new(&mut *conn).unsold().await?;
    let buyers = ParticipantRepo::new(&mut *conn).options().await?;
    let mut flashes = flash.into_flashes();

    if items.is_empty() {
        flashes.push(Flash::warning("There are no unsold lots."));
    }
    if buyers.is_empty() {
        flashes.push(Flash::warning("Add a participant to act as buyer first."));
    }
    if items.is_empty() || buyers.is_empty() {
        let body = "<p><a href=\"/items/add\">New lot</a> | \
<a href=\"/participants\">Participants</a></p>";
        return Ok(render::page("Record sale", &flashes, body));
    }

    let item_options: Vec<(String, String)> = items
        .iter()
        .map(|i| {
            (
                i.id.to_string(),
                format!("{} / lot {}: {}", i.auction_name, i.lot_number, i.title),
            )
        })
        .collect();
    let buyer_options: Vec<(String, String)> = buyers
        .into_iter()
        .map(|p| (p.id.to_string(), p.name))
        .collect();

    let fields = [
        render::select("Lot", "item_id", &item_options, None, true),
        render::select("Buyer", "buyer_id", &buyer_options, None, true),
        render::price_input("Sold price", "sold_price"),
        render::input("Sold at", "sold_at", "datetime-local", "", true),
    ]
    .concat();

    Ok(render::page(
        "Record sale",
        &flashes,
        &render::post_form(ADD_PATH, &fields, "Record"),
    ))
}

/// POST /sales/add
async fn add_sale(
    DbConn(mut conn): DbConn,
    Form(form): Form<SaleForm>,
) -> Result<Redirect, ApiError> {
    let sale = form.validate().map_err(ApiError::form(ADD_PATH))?;

    let mut tx = conn.begin().await?;
    let outcome = match SaleRepo::new(&mut *tx).create(&sale).await {
        Ok(outcome) => outcome,
        Err(DbError::Integrity { constraint }) => {
            tracing::warn!(%constraint, "sale rejected");
            return Err(ApiError::rejected(
                ADD_PATH,
                "The selected lot or buyer no longer exists",
            ));
        }
        Err(e) => return Err(e.into()),
    };

    match outcome {
        SaleOutcome::Recorded(id) => {
            tx.commit().await?;
            tracing::info!(id, item_id = sale.item_id, "sale recorded");
            Ok(flash::redirect(
                "/reports/sold-items",
                Flash::success("Sale recorded"),
            ))
        }
        SaleOutcome::AlreadySold => Err(ApiError::rejected(ADD_PATH, ALREADY_SOLD)),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(ADD_PATH, get(add_sale_form).post(add_sale))
}
