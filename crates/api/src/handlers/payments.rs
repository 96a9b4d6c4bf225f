use axum::extract::State;
use axum::Json;
use linkout_core::checkout::{delivery_charge, grand_total};
use linkout_core::money::to_minor_units;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handlers::links::assemble_order;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub link_id: String,
}

/// What the payment widget on the order page needs to open a session.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentResponse {
    pub order_id: String,
    /// Amount in minor currency units, as the provider quotes it.
    pub amount: i64,
    pub currency: String,
    /// Public provider key id for the client-side widget.
    pub key_id: String,
}

/// POST /api/create-payment -- open a payment session for the grand total
/// (cart total plus delivery charge) of a link's order.
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentRequest>,
) -> AppResult<Json<DataResponse<CreatePaymentResponse>>> {
    let order = assemble_order(&state, &payload.link_id).await?;
    let total = grand_total(
        order.total_amount,
        delivery_charge(Some(state.config.delivery_charge)),
    );
    let amount_minor = to_minor_units(total)?;

    let session = state
        .gateway
        .create_session(amount_minor, &state.config.payment.currency, &payload.link_id)
        .await?;

    Ok(Json(DataResponse::new(CreatePaymentResponse {
        order_id: session.order_id,
        amount: session.amount_minor,
        currency: session.currency,
        key_id: state.config.payment.key_id.clone(),
    })))
}
