//! End-to-end requests through the router
//!
//! The first tests use a lazily connected pool and never touch the database.

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use auctionhouse_server::{build_router, AppState};
use common::TestDb;

fn offline_router() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .expect("lazy pool");
    build_router(Arc::new(AppState { pool }))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn health_is_json() {
    let response = offline_router().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn unknown_path_is_404_page() {
    let response = offline_router().oneshot(get("/nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("<!doctype html>"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn dashboard_renders_on_empty_store() {
    let db = TestDb::new().await;
    let app = build_router(Arc::new(AppState { pool: db.pool.clone() }));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Auctions: 0"));
    assert!(html.contains("Revenue: 0.00"));

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn every_report_renders_empty() {
    let db = TestDb::new().await;
    let app = build_router(Arc::new(AppState { pool: db.pool.clone() }));

    for path in [
        "/auctions",
        "/participants",
        "/reports/auction-revenue",
        "/reports/sold-items",
        "/reports/seller-revenue",
        "/reports/active-buyers",
        "/reports/buyer-counts",
        "/reports/sellers-participated?start=2024-05-01&end=2024-05-31",
    ] {
        let response = app.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn bad_report_date_is_400() {
    let db = TestDb::new().await;
    let app = build_router(Arc::new(AppState { pool: db.pool.clone() }));

    let response = app
        .oneshot(get("/reports/sold-items?start=yesterday"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn blank_participant_name_redirects_back() {
    let db = TestDb::new().await;
    let app = build_router(Arc::new(AppState { pool: db.pool.clone() }));

    let response = app
        .oneshot(post_form("/participants", "name=+&contact_info=x"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/participants?flash=name%20is%20required&level=danger"
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM participants")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn item_form_warns_without_auctions() {
    let db = TestDb::new().await;
    let app = build_router(Arc::new(AppState { pool: db.pool.clone() }));

    let response = app.oneshot(get("/items/add")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("flash warning"));
    assert!(!html.contains("name=\"lot_number\""));

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn full_flow_through_forms() {
    let db = TestDb::new().await;
    let app = build_router(Arc::new(AppState { pool: db.pool.clone() }));

    let response = app
        .clone()
        .oneshot(post_form("/participants", "name=A"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    app.clone()
        .oneshot(post_form("/participants", "name=B"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_form(
            "/auctions/add",
            "name=Spring&location=Moscow&starts_at=2024-05-01T18%3A00",
        ))
        .await
        .unwrap();
    assert!(location(&response).starts_with("/auctions?flash="));

    let ids: Vec<(i32, String)> = sqlx::query_as("SELECT id, name FROM participants ORDER BY name")
        .fetch_all(&db.pool)
        .await
        .unwrap();
    let (a, b) = (ids[0].0, ids[1].0);
    let auction: i32 = sqlx::query_scalar("SELECT id FROM auctions")
        .fetch_one(&db.pool)
        .await
        .unwrap();

    let item_body =
        format!("auction_id={auction}&seller_id={a}&lot_number=1&title=Vase&start_price=100");
    let response = app
        .clone()
        .oneshot(post_form("/items/add", &item_body))
        .await
        .unwrap();
    assert!(location(&response).contains("level=success"));

    let response = app
        .clone()
        .oneshot(post_form("/items/add", &item_body))
        .await
        .unwrap();
    assert!(location(&response).starts_with("/items/add?flash="));
    assert!(location(&response).ends_with("level=danger"));

    let item: i32 = sqlx::query_scalar("SELECT id FROM items")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    let sale_body = format!("item_id={item}&buyer_id={b}&sold_price=150&sold_at=2024-05-02");
    let response = app
        .clone()
        .oneshot(post_form("/sales/add", &sale_body))
        .await
        .unwrap();
    assert!(location(&response).starts_with("/reports/sold-items?flash="));

    let response = app
        .clone()
        .oneshot(post_form("/sales/add", &sale_body))
        .await
        .unwrap();
    assert!(location(&response).starts_with("/sales/add?flash="));

    let sales: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(sales, 1);

    let response = app
        .oneshot(get("/reports/seller-revenue?start=2024-05-01&end=2024-05-02"))
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("<td>A</td><td>150.00</td>"));

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn editing_missing_participant_redirects() {
    let db = TestDb::new().await;
    let app = build_router(Arc::new(AppState { pool: db.pool.clone() }));

    let response = app.oneshot(get("/participants/42/edit")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/participants?flash="));

    db.cleanup().await;
}
