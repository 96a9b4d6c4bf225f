//! Spreadsheet-backed storage for the checkout-link service.
//!
//! The spreadsheet is treated as a generic tabular store behind the
//! [`Tabular`] trait: read a range, append rows, update a range, and
//! lazily create tables. [`google::GoogleSheets`] talks to the Google
//! Sheets REST API; [`memory::MemTabular`] backs tests and local
//! development. The typed stores ([`catalog::CatalogStore`],
//! [`links::LinkStore`], [`records::RecordStore`]) are the only writers
//! of their respective tables.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod google;
pub mod links;
pub mod memory;
pub mod records;
pub mod tabular;

pub use error::StoreError;
pub use tabular::Tabular;
