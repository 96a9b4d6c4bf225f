//! Order assembly: the pure join of link rows with catalog rows.
//!
//! The caller (the API layer) reads the rows and products, plus any
//! recorded payment status, and this module does the pricing. Assembly is
//! read-only and idempotent; it is safe to poll.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::order::{AssembledOrder, OrderLine, OrderLinkRow, PaymentStatus};
use crate::product::Product;

/// Join link rows with the catalog and price the order.
///
/// * `rows` -- every order-link row matching `link_id` (must be non-empty;
///   the caller maps an empty read to NotFound before getting here).
/// * `catalog` -- the full product catalog.
/// * `recorded_status` -- payment status from the order record store, if a
///   record exists for this link.
///
/// A row whose product id has no catalog match is a
/// [`CoreError::DataIntegrity`]: the order references a deleted or renamed
/// product. Payment status preference: the recorded status wins; otherwise
/// PAID if any link row was marked paid; otherwise UNPAID.
pub fn assemble(
    link_id: &str,
    rows: &[OrderLinkRow],
    catalog: &[Product],
    recorded_status: Option<PaymentStatus>,
) -> Result<AssembledOrder, CoreError> {
    if rows.is_empty() {
        return Err(CoreError::NotFound {
            entity: "order link",
            id: link_id.to_string(),
        });
    }

    let by_id: HashMap<&str, &Product> = catalog.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut products = Vec::with_capacity(rows.len());
    let mut total = Decimal::ZERO;
    for row in rows {
        let product = by_id.get(row.product_id.as_str()).ok_or_else(|| {
            CoreError::DataIntegrity(format!("Product not found: {}", row.product_id))
        })?;
        let line_total = product.price * Decimal::from(row.quantity);
        total += line_total;
        products.push(OrderLine {
            product: (*product).clone(),
            quantity: row.quantity,
            line_total,
        });
    }

    let payment_status = recorded_status.unwrap_or_else(|| {
        if rows
            .iter()
            .any(|r| r.payment_status == PaymentStatus::Paid)
        {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        }
    });

    Ok(AssembledOrder {
        link_id: link_id.to_string(),
        products,
        total_amount: total,
        payment_status,
    })
}
