//! Catalog product types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product, read-only to this service.
///
/// The SKU selects the customization schema (see [`crate::customize`]);
/// `colors` is the comma-separated color set offered for color-customizable
/// SKUs. Shipment metrics are carried through to the order record when
/// present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(rename = "SKU", skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<String>,
    #[serde(flatten)]
    pub shipment: ShipmentMetrics,
}

/// Optional package dimensions, in the catalog owner's units.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipmentMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadth: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Decimal>,
}

impl Product {
    /// The color choices offered by this product, trimmed and non-empty.
    pub fn color_choices(&self) -> Vec<&str> {
        self.colors
            .as_deref()
            .map(|c| {
                c.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
