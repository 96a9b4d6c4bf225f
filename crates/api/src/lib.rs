//! HTTP surface for the checkout-link service.
//!
//! Library layout mirrors the binary so integration tests can build the
//! full router in-process:
//!
//! - [`config`] -- environment-driven configuration
//! - [`state`] -- shared [`state::AppState`] behind every handler
//! - [`error`] -- [`error::AppError`] and its JSON [`axum::response::IntoResponse`]
//! - [`auth`] -- admin token issuing and the `AdminUser` extractor
//! - [`router`] -- middleware stack shared by `main.rs` and tests
//! - [`routes`] / [`handlers`] -- the endpoint tree

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
