//! Shared harness for API integration tests.
//!
//! Builds the full router over the in-memory spreadsheet and mock
//! gateway/blob clients so tests exercise the same middleware stack that
//! production uses.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use linkout_api::config::{AdminConfig, PaymentConfig, ServerConfig};
use linkout_api::router::build_app_router;
use linkout_api::state::{AppState, SharedTabular};
use linkout_gateway::{BlobStore, GatewayError, PaymentGateway, PaymentSession};
use linkout_sheets::memory::MemTabular;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "hunter2";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        delivery_charge: 50,
        admin: AdminConfig {
            username: ADMIN_USERNAME.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        },
        payment: PaymentConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: "secret".to_string(),
            currency: "INR".to_string(),
        },
    }
}

/// Payment gateway that fabricates sessions and counts calls.
#[derive(Default)]
pub struct MockGateway {
    pub calls: AtomicU64,
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_session(
        &self,
        amount_minor: i64,
        currency: &str,
        _receipt: &str,
    ) -> Result<PaymentSession, GatewayError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PaymentSession {
            order_id: format!("order_test_{n}"),
            amount_minor,
            currency: currency.to_string(),
        })
    }
}

/// Blob store that echoes a fake URL without any IO.
#[derive(Default)]
pub struct MockBlob;

#[async_trait]
impl BlobStore for MockBlob {
    async fn upload(
        &self,
        pathname: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, GatewayError> {
        Ok(format!("https://blob.test/{pathname}"))
    }
}

/// Build the full application router over `sheet`, mirroring `main.rs`.
pub fn build_test_app(sheet: Arc<MemTabular>) -> Router {
    let config = test_config();
    let shared: SharedTabular = sheet;
    let state = AppState::new(
        config.clone(),
        shared,
        Arc::new(MockGateway::default()),
        Arc::new(MockBlob),
    );
    build_app_router(state, &config)
}

/// Seed the product catalog with a fixed set covering every SKU schema.
///
/// | Id | Price  | SKU      |
/// |----|--------|----------|
/// | P1 | 100    | KCNP002  |
/// | P2 | 249.50 | KCKR001  |
/// | P3 | 999    | (none)   |
pub async fn seed_catalog(sheet: &MemTabular) {
    let row = |cells: &[&str]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
    sheet
        .seed(
            "Sheet1",
            vec![
                row(&[
                    "Id", "Name", "Description", "Price", "SKU", "Colors", "Weight", "Length",
                    "Breadth", "Height",
                ]),
                row(&[
                    "P1", "Keychain", "Engraved keychain", "100", "KCNP002", "", "0.05", "10",
                    "5", "1",
                ]),
                row(&["P2", "Ring", "Colored ring", "249.50", "KCKR001", "white, black"]),
                row(&["P3", "Frame", "Photo frame", "999"]),
            ],
        )
        .await;
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET with an admin bearer token.
pub async fn get_authed(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {}", admin_token()))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body, None).await
}

/// POST a JSON body with an admin bearer token.
pub async fn post_json_authed(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body, Some(admin_token())).await
}

/// PUT a JSON body with an admin bearer token.
pub async fn put_json_authed(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body, Some(admin_token())).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<String>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// The token the login endpoint would hand out for the test credential.
pub fn admin_token() -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(format!("{ADMIN_USERNAME}:{ADMIN_PASSWORD}"))
}

/// Read a response body to completion and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response is an error envelope with the given status.
pub async fn assert_error(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].is_string());
    json
}
