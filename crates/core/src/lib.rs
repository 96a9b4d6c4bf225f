//! Domain logic for the checkout-link service.
//!
//! This crate is pure: no IO, no HTTP, no spreadsheet access. It owns the
//! order/product types, the per-SKU customization engine, the checkout
//! billing rules, and order assembly. The `sheets` and `api` crates drive
//! everything in here.

pub mod assembly;
pub mod checkout;
pub mod customize;
pub mod error;
pub mod link_id;
pub mod money;
pub mod order;
pub mod product;
pub mod types;
