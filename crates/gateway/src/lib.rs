//! Clients for external paid services: the payment provider and the blob
//! store used for customer image uploads.

pub mod blob;
pub mod error;
pub mod payment;

pub use blob::{BlobStore, VercelBlob};
pub use error::GatewayError;
pub use payment::{PaymentGateway, PaymentSession, RazorpayGateway};
