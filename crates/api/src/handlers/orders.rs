use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use linkout_core::checkout::{
    delivery_charge, grand_total, resolve_billing, validate_address, validate_contact,
};
use linkout_core::customize::{is_valid_for_sku, SkuSchema};
use linkout_core::error::CoreError;
use linkout_core::order::{
    Address, AssembledOrder, ContactInfo, CustomizationDetails, OrderRecord, PaymentStatus,
};
use serde::Deserialize;

use crate::auth::AdminUser;
use crate::error::{AppError, AppResult};
use crate::handlers::links::assemble_order;
use crate::response::{Ack, DataResponse};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeRequest {
    pub link_id: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub shipping_address: Address,
    #[serde(default)]
    pub same_as_shipping: bool,
    #[serde(default)]
    pub billing_address: Option<Address>,
    pub payment_id: String,
    #[serde(default)]
    pub customization_details: CustomizationDetails,
}

/// POST /api/saveToSheet -- finalize a paid checkout.
///
/// Idempotent: a link that already has a persisted record acknowledges
/// without writing again, so payment-callback retries are harmless.
/// Otherwise validates the submission against the assembled order, appends
/// the order record, then marks the link rows PAID. The append is not
/// rolled back if marking fails; the error is surfaced and a retry will
/// take the idempotent path and re-mark.
pub async fn finalize(
    State(state): State<AppState>,
    Json(payload): Json<FinalizeRequest>,
) -> AppResult<Json<Ack>> {
    if let Some(existing) = state.records.find_by_link(&payload.link_id).await? {
        tracing::info!(link_id = %payload.link_id, payment_id = %existing.payment_id,
            "Order already finalized, acknowledging replay");
        state
            .links
            .mark_status(&payload.link_id, PaymentStatus::Paid)
            .await?;
        return Ok(Json(Ack::new()));
    }

    let order = assemble_order(&state, &payload.link_id).await?;

    validate_contact(&payload.contact)?;
    validate_address("shipping", &payload.shipping_address)?;
    let billing = resolve_billing(
        payload.same_as_shipping,
        &payload.shipping_address,
        payload.billing_address.as_ref(),
    )?;
    validate_customization(&order, &payload.customization_details)?;

    if payload.payment_id.trim().is_empty() {
        return Err(CoreError::Validation("paymentId is required".into()).into());
    }

    let delivery = delivery_charge(Some(state.config.delivery_charge));
    let record = OrderRecord {
        link_id: payload.link_id.clone(),
        contact: payload.contact,
        shipping_address: payload.shipping_address,
        billing_address: billing,
        cart_total_amount: order.total_amount,
        delivery_charges: delivery,
        total_amount: grand_total(order.total_amount, delivery),
        payment_id: payload.payment_id,
        payment_status: PaymentStatus::Paid,
        timestamp: Utc::now(),
        shipment: order
            .products
            .first()
            .map(|line| line.product.shipment.clone())
            .unwrap_or_default(),
        customization_details: payload.customization_details,
    };

    state.records.append_record(&record).await?;
    tracing::info!(link_id = %record.link_id, total = %record.total_amount, "Order recorded");

    if let Err(err) = state
        .links
        .mark_status(&record.link_id, PaymentStatus::Paid)
        .await
    {
        tracing::error!(link_id = %record.link_id, error = %err,
            "Order recorded but link rows not marked paid");
        return Err(err.into());
    }

    Ok(Json(Ack::new()))
}

/// Every customizable product in the order must carry a valid entry of the
/// right unit count. Uncustomizable products must not carry entries at all,
/// so stale client state cannot smuggle data into the record.
fn validate_customization(
    order: &AssembledOrder,
    details: &CustomizationDetails,
) -> Result<(), AppError> {
    for line in &order.products {
        let Some(sku) = line.product.sku.as_deref() else {
            continue;
        };
        if !SkuSchema::for_sku(sku).is_customizable() {
            continue;
        }
        let entry = details.get(&line.product.id).ok_or_else(|| {
            CoreError::Validation(format!(
                "customization missing for product {}",
                line.product.id
            ))
        })?;
        if entry.units.len() != line.quantity as usize {
            return Err(CoreError::Validation(format!(
                "customization for product {} must cover {} units",
                line.product.id, line.quantity
            ))
            .into());
        }
        let values: Vec<_> = entry.units.iter().map(|u| u.value.clone()).collect();
        if !is_valid_for_sku(sku, &values) {
            return Err(CoreError::Validation(format!(
                "customization for product {} is invalid for SKU {sku}",
                line.product.id
            ))
            .into());
        }
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub link_id: String,
    pub payment_status: PaymentStatus,
}

/// PUT /api/update-payment-status -- move every row of a link between
/// UNPAID and PAID. Admin only.
pub async fn update_payment_status(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Ack>> {
    let updated = state
        .links
        .mark_status(&payload.link_id, payload.payment_status)
        .await?;
    if updated == 0 {
        return Err(CoreError::NotFound {
            entity: "order link",
            id: payload.link_id,
        }
        .into());
    }
    tracing::info!(link_id = %payload.link_id, rows = updated,
        status = payload.payment_status.as_str(), "Updated link payment status");
    Ok(Json(Ack::new()))
}

/// GET /api/order/{linkId} -- the persisted order record. Admin only.
pub async fn get_order(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(link_id): Path<String>,
) -> AppResult<Json<DataResponse<OrderRecord>>> {
    let record = state
        .records
        .find_by_link(&link_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "order",
            id: link_id,
        })?;
    Ok(Json(DataResponse::new(record)))
}
