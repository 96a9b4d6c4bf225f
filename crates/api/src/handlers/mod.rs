pub mod auth;
pub mod links;
pub mod orders;
pub mod payments;
pub mod products;
pub mod uploads;
