//! Shared response envelope types for API handlers.
//!
//! All API responses carry a `success` discriminator. Use [`DataResponse`]
//! for the common `{ "success": true, "data": ... }` shape instead of
//! ad-hoc `serde_json::json!` blocks; endpoints with bespoke top-level
//! keys (`linkId`, `token`, `blobUrl`) build those inline.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Bare `{ "success": true }` acknowledgement for write endpoints.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for Ack {
    fn default() -> Self {
        Self::new()
    }
}
