//! Durable order records, written once per completed checkout.

use chrono::DateTime;
use linkout_core::order::{
    Address, ContactInfo, CustomizationDetails, OrderRecord, PaymentStatus,
};
use linkout_core::product::ShipmentMetrics;
use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::tabular::{ensure_table, Tabular};

pub const ORDERS_TABLE: &str = "Orders";

const ORDERS_RANGE: &str = "A:Z";

const HEADER: [&str; 26] = [
    "Link ID",
    "Phone Number",
    "Email",
    "First Name",
    "Last Name",
    "Shipping Address Line 1",
    "Shipping Address Line 2",
    "Shipping City",
    "Shipping State",
    "Shipping Pincode",
    "Billing Address Line 1",
    "Billing Address Line 2",
    "Billing City",
    "Billing State",
    "Billing Pincode",
    "Cart Total",
    "Delivery Charges",
    "Total Amount",
    "Payment ID",
    "Payment Status",
    "Timestamp",
    "Weight",
    "Length",
    "Breadth",
    "Height",
    "Customization Details",
];

pub struct RecordStore<T> {
    store: T,
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("").trim()
}

fn decimal_cell(row: &[String], idx: usize, field: &str) -> Result<Decimal, StoreError> {
    cell(row, idx)
        .parse()
        .map_err(|_| StoreError::BadCell(format!("unparseable {field} in order record")))
}

fn opt_decimal(row: &[String], idx: usize) -> Option<Decimal> {
    cell(row, idx).parse().ok()
}

fn metric_cell(metric: Option<Decimal>) -> String {
    metric.map(|m| m.to_string()).unwrap_or_default()
}

fn to_row(record: &OrderRecord) -> Result<Vec<String>, StoreError> {
    let customization = if record.customization_details.is_empty() {
        String::new()
    } else {
        serde_json::to_string(&record.customization_details)
            .map_err(|e| StoreError::BadCell(format!("unserializable customization: {e}")))?
    };
    Ok(vec![
        record.link_id.clone(),
        record.contact.phone_number.clone(),
        record.contact.email.clone().unwrap_or_default(),
        record.contact.first_name.clone(),
        record.contact.last_name.clone(),
        record.shipping_address.address_line1.clone(),
        record.shipping_address.address_line2.clone(),
        record.shipping_address.city.clone(),
        record.shipping_address.state.clone(),
        record.shipping_address.pincode.clone(),
        record.billing_address.address_line1.clone(),
        record.billing_address.address_line2.clone(),
        record.billing_address.city.clone(),
        record.billing_address.state.clone(),
        record.billing_address.pincode.clone(),
        record.cart_total_amount.to_string(),
        record.delivery_charges.to_string(),
        record.total_amount.to_string(),
        record.payment_id.clone(),
        record.payment_status.as_str().to_string(),
        record.timestamp.to_rfc3339(),
        metric_cell(record.shipment.weight),
        metric_cell(record.shipment.length),
        metric_cell(record.shipment.breadth),
        metric_cell(record.shipment.height),
        customization,
    ])
}

fn address(row: &[String], base: usize) -> Address {
    Address {
        address_line1: cell(row, base).to_string(),
        address_line2: cell(row, base + 1).to_string(),
        city: cell(row, base + 2).to_string(),
        state: cell(row, base + 3).to_string(),
        pincode: cell(row, base + 4).to_string(),
    }
}

fn from_row(row: &[String]) -> Result<OrderRecord, StoreError> {
    let email = cell(row, 2);
    let customization: CustomizationDetails = match cell(row, 25) {
        "" => CustomizationDetails::new(),
        json => serde_json::from_str(json)
            .map_err(|e| StoreError::BadCell(format!("bad customization cell: {e}")))?,
    };
    let timestamp = DateTime::parse_from_rfc3339(cell(row, 20))
        .map_err(|_| StoreError::BadCell("bad timestamp in order record".into()))?
        .to_utc();
    Ok(OrderRecord {
        link_id: cell(row, 0).to_string(),
        contact: ContactInfo {
            phone_number: cell(row, 1).to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
            first_name: cell(row, 3).to_string(),
            last_name: cell(row, 4).to_string(),
        },
        shipping_address: address(row, 5),
        billing_address: address(row, 10),
        cart_total_amount: decimal_cell(row, 15, "cart total")?,
        delivery_charges: decimal_cell(row, 16, "delivery charges")?,
        total_amount: decimal_cell(row, 17, "total amount")?,
        payment_id: cell(row, 18).to_string(),
        payment_status: PaymentStatus::parse(cell(row, 19)),
        timestamp,
        shipment: ShipmentMetrics {
            weight: opt_decimal(row, 21),
            length: opt_decimal(row, 22),
            breadth: opt_decimal(row, 23),
            height: opt_decimal(row, 24),
        },
        customization_details: customization,
    })
}

impl<T: Tabular> RecordStore<T> {
    pub fn new(store: T) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &T {
        &self.store
    }

    pub async fn append_record(&self, record: &OrderRecord) -> Result<(), StoreError> {
        ensure_table(&self.store, ORDERS_TABLE, &HEADER).await?;
        self.store
            .append(ORDERS_TABLE, ORDERS_RANGE, vec![to_row(record)?])
            .await
    }

    /// First record matching `link_id`, if any. Finalize checks this
    /// before writing so retries stay idempotent.
    pub async fn find_by_link(&self, link_id: &str) -> Result<Option<OrderRecord>, StoreError> {
        if !self.store.table_exists(ORDERS_TABLE).await? {
            return Ok(None);
        }
        let rows = self.store.read(ORDERS_TABLE, ORDERS_RANGE).await?;
        for row in rows.iter().skip(1) {
            if cell(row, 0) == link_id {
                return Ok(Some(from_row(row)?));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemTabular;
    use chrono::Utc;
    use linkout_core::customize::{CustomizationEntry, CustomizationUnit, UnitCustomization};

    fn sample_record() -> OrderRecord {
        let mut customization = CustomizationDetails::new();
        customization.insert(
            "P1".into(),
            CustomizationEntry {
                link_id: "abc123".into(),
                sku: "KCNP002".into(),
                units: vec![CustomizationUnit {
                    unit_label: "#1".into(),
                    value: UnitCustomization::Title {
                        title: "Asha".into(),
                    },
                }],
            },
        );
        OrderRecord {
            link_id: "abc123".into(),
            contact: ContactInfo {
                phone_number: "9876543210".into(),
                email: Some("a@example.com".into()),
                first_name: "Asha".into(),
                last_name: "Rao".into(),
            },
            shipping_address: Address {
                address_line1: "12 MG Road".into(),
                address_line2: String::new(),
                city: "Bengaluru".into(),
                state: "Karnataka".into(),
                pincode: "560001".into(),
            },
            billing_address: Address {
                address_line1: "12 MG Road".into(),
                address_line2: String::new(),
                city: "Bengaluru".into(),
                state: "Karnataka".into(),
                pincode: "560001".into(),
            },
            cart_total_amount: "498".parse().unwrap(),
            delivery_charges: "50".parse().unwrap(),
            total_amount: "548".parse().unwrap(),
            payment_id: "pay_001".into(),
            payment_status: PaymentStatus::Paid,
            timestamp: Utc::now(),
            shipment: ShipmentMetrics {
                weight: Some("0.05".parse().unwrap()),
                length: Some("10".parse().unwrap()),
                breadth: Some("5".parse().unwrap()),
                height: None,
            },
            customization_details: customization,
        }
    }

    #[tokio::test]
    async fn record_round_trips_through_the_sheet() {
        let records = RecordStore::new(MemTabular::new());
        let record = sample_record();
        records.append_record(&record).await.unwrap();

        let found = records.find_by_link("abc123").await.unwrap().unwrap();
        assert_eq!(found.link_id, record.link_id);
        assert_eq!(found.contact.email.as_deref(), Some("a@example.com"));
        assert_eq!(found.total_amount, record.total_amount);
        assert_eq!(found.payment_status, PaymentStatus::Paid);
        assert_eq!(found.shipment.weight, record.shipment.weight);
        assert!(found.shipment.height.is_none());
        assert_eq!(found.customization_details.len(), 1);
        assert_eq!(found.customization_details["P1"].sku, "KCNP002");
    }

    #[tokio::test]
    async fn find_by_link_without_table_is_none() {
        let records = RecordStore::new(MemTabular::new());
        assert!(records.find_by_link("abc123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_link_misses_other_links() {
        let records = RecordStore::new(MemTabular::new());
        records.append_record(&sample_record()).await.unwrap();
        assert!(records.find_by_link("zzz999").await.unwrap().is_none());
    }
}
