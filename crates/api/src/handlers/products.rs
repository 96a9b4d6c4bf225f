use axum::extract::{Path, State};
use axum::Json;
use linkout_core::error::CoreError;
use linkout_core::product::Product;

use crate::auth::AdminUser;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/products -- full catalog, admin only.
pub async fn list_products(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = state.catalog.list_products().await?;
    Ok(Json(DataResponse::new(products)))
}

/// GET /api/product/{productId} -- single product, public (order page).
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = state
        .catalog
        .find_product(&product_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        })?;
    Ok(Json(DataResponse::new(product)))
}
