use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use linkout_core::assembly::assemble;
use linkout_core::error::CoreError;
use linkout_core::link_id::generate_link_id;
use linkout_core::order::{AssembledOrder, OrderItem};
use serde::{Deserialize, Serialize};

use crate::auth::AdminUser;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateLinkRequest {
    #[serde(default)]
    pub products: Vec<OrderItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLinkResponse {
    pub success: bool,
    pub link_id: String,
}

/// POST /api/generate-link -- create a link id and append one row per
/// product. Admin only.
pub async fn generate_link(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<GenerateLinkRequest>,
) -> AppResult<Json<GenerateLinkResponse>> {
    if payload.products.is_empty() {
        return Err(CoreError::Validation("products must be a non-empty list".into()).into());
    }
    for item in &payload.products {
        if item.quantity < 1 {
            return Err(CoreError::Validation(format!(
                "quantity for product {} must be at least 1",
                item.product_id
            ))
            .into());
        }
    }

    let link_id = generate_link_id();
    state
        .links
        .append_order(&link_id, &payload.products, Utc::now())
        .await?;
    tracing::info!(%link_id, products = payload.products.len(), "Generated order link");

    Ok(Json(GenerateLinkResponse {
        success: true,
        link_id,
    }))
}

/// GET /api/order-link/{linkId} -- join link rows with the catalog into a
/// priced order. Public: this is what the customer-facing page loads.
pub async fn get_order_link(
    State(state): State<AppState>,
    Path(link_id): Path<String>,
) -> AppResult<Json<DataResponse<AssembledOrder>>> {
    let order = assemble_order(&state, &link_id).await?;
    Ok(Json(DataResponse::new(order)))
}

/// Read link rows, catalog, and any persisted record for `link_id` and
/// join them. Shared with the payment and finalize handlers.
pub(crate) async fn assemble_order(
    state: &AppState,
    link_id: &str,
) -> AppResult<AssembledOrder> {
    let rows: Vec<_> = state
        .links
        .rows_for(link_id)
        .await?
        .into_iter()
        .map(|(_, row)| row)
        .collect();
    let products = state.catalog.list_products().await?;
    let recorded = state
        .records
        .find_by_link(link_id)
        .await?
        .map(|r| r.payment_status);
    Ok(assemble(link_id, &rows, &products, recorded)?)
}
