//! Order-link rows: one row per (link, product) pair.

use linkout_core::order::{OrderItem, OrderLinkRow, PaymentStatus};
use linkout_core::types::Timestamp;

use crate::error::StoreError;
use crate::tabular::{ensure_table, Tabular};

pub const ORDER_LINKS_TABLE: &str = "OrderLinks";

const LINKS_RANGE: &str = "A:E";

const HEADER: [&str; 5] = [
    "Link ID",
    "Product ID",
    "Quantity",
    "Timestamp",
    "Payment Status",
];

pub struct LinkStore<T> {
    store: T,
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("").trim()
}

fn is_header(row: &[String]) -> bool {
    cell(row, 0) == HEADER[0]
}

/// Parse one sheet row. Header and blank rows yield `None`. A non-empty
/// quantity cell that is not a number is corruption, not a zero-quantity
/// line; it must surface rather than silently underprice the order.
fn parse_row(row: &[String]) -> Result<Option<OrderLinkRow>, StoreError> {
    let link_id = cell(row, 0);
    if link_id.is_empty() || is_header(row) {
        return Ok(None);
    }
    let quantity_cell = cell(row, 2);
    let quantity = if quantity_cell.is_empty() {
        0
    } else {
        quantity_cell.parse().map_err(|_| {
            StoreError::BadCell(format!(
                "unparseable quantity {quantity_cell:?} on link {link_id}"
            ))
        })?
    };
    Ok(Some(OrderLinkRow {
        link_id: link_id.to_string(),
        product_id: cell(row, 1).to_string(),
        quantity,
        timestamp: cell(row, 3).to_string(),
        payment_status: PaymentStatus::parse(cell(row, 4)),
    }))
}

impl<T: Tabular> LinkStore<T> {
    pub fn new(store: T) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &T {
        &self.store
    }

    /// Append one row per item under `link_id`, creating the table on
    /// first use. New rows always start out unpaid.
    pub async fn append_order(
        &self,
        link_id: &str,
        items: &[OrderItem],
        timestamp: Timestamp,
    ) -> Result<(), StoreError> {
        ensure_table(&self.store, ORDER_LINKS_TABLE, &HEADER).await?;
        let stamp = timestamp.to_rfc3339();
        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|item| {
                vec![
                    link_id.to_string(),
                    item.product_id.clone(),
                    item.quantity.to_string(),
                    stamp.clone(),
                    PaymentStatus::Unpaid.as_str().to_string(),
                ]
            })
            .collect();
        self.store.append(ORDER_LINKS_TABLE, LINKS_RANGE, rows).await
    }

    /// All rows belonging to `link_id`, each paired with its 1-based sheet
    /// row so the status cell can be addressed later.
    pub async fn rows_for(&self, link_id: &str) -> Result<Vec<(usize, OrderLinkRow)>, StoreError> {
        if !self.store.table_exists(ORDER_LINKS_TABLE).await? {
            return Ok(Vec::new());
        }
        let rows = self.store.read(ORDER_LINKS_TABLE, LINKS_RANGE).await?;
        let mut matching = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            // Filter by link before parsing so corruption in one link's
            // rows cannot fail reads of every other link.
            if cell(row, 0) != link_id {
                continue;
            }
            if let Some(parsed) = parse_row(row)? {
                matching.push((i + 1, parsed));
            }
        }
        Ok(matching)
    }

    /// Set the payment status cell on every row of `link_id`.
    pub async fn mark_status(
        &self,
        link_id: &str,
        status: PaymentStatus,
    ) -> Result<usize, StoreError> {
        let rows = self.rows_for(link_id).await?;
        for (sheet_row, _) in &rows {
            self.store
                .update(
                    ORDER_LINKS_TABLE,
                    &format!("E{sheet_row}"),
                    vec![vec![status.as_str().to_string()]],
                )
                .await?;
        }
        Ok(rows.len())
    }
}
