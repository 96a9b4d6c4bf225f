//! Order-side types: link rows, the assembled (derived) order, and the
//! durable record written at payment completion.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customize::CustomizationEntry;
use crate::product::{Product, ShipmentMetrics};
use crate::types::Timestamp;

/// One (productId, quantity) pair requested when generating a link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
}

/// A single row of the order-link table. One row per (link, product) pair;
/// multiple rows share a `link_id` for multi-product orders. Rows are
/// written once and never deleted; only the payment status cell moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLinkRow {
    pub link_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub timestamp: String,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "UNPAID")]
    Unpaid,
    #[serde(rename = "PAID")]
    Paid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "UNPAID",
            PaymentStatus::Paid => "PAID",
        }
    }

    /// Anything other than the literal `PAID` reads as unpaid, so legacy
    /// rows without a status cell default correctly.
    pub fn parse(cell: &str) -> Self {
        if cell.trim() == "PAID" {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        }
    }
}

/// One priced line of an assembled order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// Derived view joining link rows with catalog rows. Never stored;
/// recomputed on every fetch-by-link request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledOrder {
    pub link_id: String,
    pub products: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
}

/// Buyer contact details collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

/// A shipping or billing address. All fields except `address_line2` are
/// required by checkout validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// Per-product customization payloads submitted with the order, keyed by
/// product id. `BTreeMap` keeps the serialized form stable.
pub type CustomizationDetails = BTreeMap<String, CustomizationEntry>;

/// The durable record of a completed (paid) checkout. Written exactly once
/// by the finalize operation; the only later transition is the matching
/// link rows moving UNPAID -> PAID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub link_id: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub cart_total_amount: Decimal,
    pub delivery_charges: Decimal,
    pub total_amount: Decimal,
    pub payment_id: String,
    pub payment_status: PaymentStatus,
    pub timestamp: Timestamp,
    /// Shipment metrics derived from the first product in the order.
    #[serde(default)]
    pub shipment: ShipmentMetrics,
    #[serde(default)]
    pub customization_details: CustomizationDetails,
}
