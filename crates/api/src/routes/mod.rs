pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/login                login (public)
///
/// /products                   product catalog (admin only)
/// /product/{productId}        single product (public, order page)
///
/// /generate-link              create a checkout link (admin only)
/// /order-link/{linkId}        assembled order for a link (public)
///
/// /create-payment             open a payment session (public)
/// /saveToSheet                finalize a paid checkout (public)
/// /update-payment-status      move link rows UNPAID/PAID (admin only)
/// /order/{linkId}             persisted order record (admin only)
///
/// /upload-image               customization image upload (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(handlers::auth::login))
        .route("/products", get(handlers::products::list_products))
        .route("/product/{product_id}", get(handlers::products::get_product))
        .route("/generate-link", post(handlers::links::generate_link))
        .route("/order-link/{link_id}", get(handlers::links::get_order_link))
        .route("/create-payment", post(handlers::payments::create_payment))
        .route("/saveToSheet", post(handlers::orders::finalize))
        .route(
            "/update-payment-status",
            put(handlers::orders::update_payment_status),
        )
        .route("/order/{link_id}", get(handlers::orders::get_order))
        // The axum default body limit (2 MB) is below the 5 MB upload cap;
        // the handler enforces the cap itself.
        .route(
            "/upload-image",
            post(handlers::uploads::upload_image)
                .layer(DefaultBodyLimit::max(8 * 1024 * 1024)),
        )
}
