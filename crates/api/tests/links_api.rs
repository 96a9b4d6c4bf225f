//! Integration tests for link generation and order assembly.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, get, post_json_authed, put_json_authed, seed_catalog,
};
use linkout_sheets::memory::MemTabular;
use serde_json::json;

async fn generate(app: axum::Router, products: serde_json::Value) -> serde_json::Value {
    let response = post_json_authed(app, "/api/generate-link", json!({ "products": products })).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Test: generate then assemble reproduces quantities and totals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generated_link_assembles_with_correct_totals() {
    let sheet = Arc::new(MemTabular::new());
    seed_catalog(&sheet).await;

    let json = generate(
        common::build_test_app(Arc::clone(&sheet)),
        json!([
            { "productId": "P1", "quantity": 2 },
            { "productId": "P3", "quantity": 1 }
        ]),
    )
    .await;
    assert_eq!(json["success"], true);
    let link_id = json["linkId"].as_str().unwrap().to_string();
    assert_eq!(link_id.len(), 16, "link id is 8 random bytes hex-encoded");

    let response = get(
        common::build_test_app(sheet),
        &format!("/api/order-link/{link_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["linkId"], link_id.as_str());
    assert_eq!(data["paymentStatus"], "UNPAID");

    let lines = data["products"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    // P1: 100 x 2, P3: 999 x 1.
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[0]["lineTotal"], "200");
    assert_eq!(lines[1]["lineTotal"], "999");
    assert_eq!(data["totalAmount"], "1199");
}

// ---------------------------------------------------------------------------
// Test: validation failures on generate-link
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_product_list_is_400() {
    let sheet = Arc::new(MemTabular::new());
    seed_catalog(&sheet).await;
    let app = common::build_test_app(sheet);

    let response = post_json_authed(app, "/api/generate-link", json!({ "products": [] })).await;
    assert_error(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn zero_quantity_is_400() {
    let sheet = Arc::new(MemTabular::new());
    seed_catalog(&sheet).await;
    let app = common::build_test_app(sheet);

    let response = post_json_authed(
        app,
        "/api/generate-link",
        json!({ "products": [{ "productId": "P1", "quantity": 0 }] }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST).await;
}

// ---------------------------------------------------------------------------
// Test: unknown link id assembles to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_link_is_404() {
    let sheet = Arc::new(MemTabular::new());
    seed_catalog(&sheet).await;
    let app = common::build_test_app(sheet);

    let response = get(app, "/api/order-link/ffffffffffffffff").await;
    assert_error(response, StatusCode::NOT_FOUND).await;
}

// ---------------------------------------------------------------------------
// Test: link row referencing a product missing from the catalog is a 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn link_to_missing_product_is_data_integrity_error() {
    let sheet = Arc::new(MemTabular::new());
    seed_catalog(&sheet).await;

    let json = generate(
        common::build_test_app(Arc::clone(&sheet)),
        json!([{ "productId": "GHOST", "quantity": 1 }]),
    )
    .await;
    let link_id = json["linkId"].as_str().unwrap().to_string();

    let response = get(
        common::build_test_app(sheet),
        &format!("/api/order-link/{link_id}"),
    )
    .await;
    let json = assert_error(response, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(json["error"], "DATA_INTEGRITY");
}

// ---------------------------------------------------------------------------
// Test: update-payment-status is visible in subsequent assembly
// ---------------------------------------------------------------------------

#[tokio::test]
async fn marking_paid_is_visible_in_assembly() {
    let sheet = Arc::new(MemTabular::new());
    seed_catalog(&sheet).await;

    let json = generate(
        common::build_test_app(Arc::clone(&sheet)),
        json!([{ "productId": "P1", "quantity": 1 }]),
    )
    .await;
    let link_id = json["linkId"].as_str().unwrap().to_string();

    let response = put_json_authed(
        common::build_test_app(Arc::clone(&sheet)),
        "/api/update-payment-status",
        json!({ "linkId": link_id, "paymentStatus": "PAID" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        common::build_test_app(sheet),
        &format!("/api/order-link/{link_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["paymentStatus"], "PAID");
}

#[tokio::test]
async fn updating_status_of_unknown_link_is_404() {
    let sheet = Arc::new(MemTabular::new());
    seed_catalog(&sheet).await;
    let app = common::build_test_app(sheet);

    let response = put_json_authed(
        app,
        "/api/update-payment-status",
        json!({ "linkId": "ffffffffffffffff", "paymentStatus": "PAID" }),
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND).await;
}
