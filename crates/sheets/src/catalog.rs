//! Product catalog read from the spreadsheet.

use linkout_core::error::CoreError;
use linkout_core::money::parse_price;
use linkout_core::product::{Product, ShipmentMetrics};
use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::tabular::Tabular;

pub const PRODUCTS_TABLE: &str = "Sheet1";

/// Header row is skipped by starting the range at row 2.
const PRODUCTS_RANGE: &str = "A2:J";

pub struct CatalogStore<T> {
    store: T,
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("").trim()
}

fn opt_cell(row: &[String], idx: usize) -> Option<String> {
    let value = cell(row, idx);
    (!value.is_empty()).then(|| value.to_string())
}

fn opt_decimal(row: &[String], idx: usize) -> Option<Decimal> {
    let value = cell(row, idx);
    if value.is_empty() {
        return None;
    }
    value.parse().ok()
}

fn parse_product(row: &[String]) -> Result<Option<Product>, CoreError> {
    let id = cell(row, 0);
    if id.is_empty() {
        // Blank filler rows between entries are tolerated.
        return Ok(None);
    }
    let price = parse_price(cell(row, 3)).map_err(|_| {
        CoreError::DataIntegrity(format!("product {id} has an unparseable price"))
    })?;
    Ok(Some(Product {
        id: id.to_string(),
        name: cell(row, 1).to_string(),
        description: cell(row, 2).to_string(),
        price,
        sku: opt_cell(row, 4),
        colors: opt_cell(row, 5),
        shipment: ShipmentMetrics {
            weight: opt_decimal(row, 6),
            length: opt_decimal(row, 7),
            breadth: opt_decimal(row, 8),
            height: opt_decimal(row, 9),
        },
    }))
}

impl<T: Tabular> CatalogStore<T> {
    pub fn new(store: T) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &T {
        &self.store
    }

    /// All products in the catalog, skipping blank rows.
    pub async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let rows = self.store.read(PRODUCTS_TABLE, PRODUCTS_RANGE).await?;
        let mut products = Vec::with_capacity(rows.len());
        for row in &rows {
            match parse_product(row) {
                Ok(Some(product)) => products.push(product),
                Ok(None) => {}
                Err(err) => return Err(StoreError::BadCell(err.to_string())),
            }
        }
        Ok(products)
    }

    pub async fn find_product(&self, id: &str) -> Result<Option<Product>, StoreError> {
        Ok(self.list_products().await?.into_iter().find(|p| p.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemTabular;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    async fn seeded() -> CatalogStore<MemTabular> {
        let mem = MemTabular::new();
        mem.seed(
            PRODUCTS_TABLE,
            vec![
                row(&[
                    "Id", "Name", "Description", "Price", "SKU", "Colors", "Weight", "Length",
                    "Breadth", "Height",
                ]),
                row(&[
                    "P1", "Keychain", "Engraved keychain", "249.00", "KCNP002", "", "0.05", "10",
                    "5", "1",
                ]),
                row(&["P2", "Ring", "Plain ring", "999", "KCKR001", "white, black"]),
                row(&[]),
                row(&["P3", "Frame", "Photo frame", "1499.50"]),
            ],
        )
        .await;
        CatalogStore::new(mem)
    }

    #[tokio::test]
    async fn lists_products_skipping_blank_rows() {
        let catalog = seeded().await;
        let products = catalog.list_products().await.unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, "P1");
        assert_eq!(products[0].price, "249.00".parse::<Decimal>().unwrap());
        assert_eq!(products[0].sku.as_deref(), Some("KCNP002"));
        assert_eq!(products[2].id, "P3");
        assert!(products[2].sku.is_none());
    }

    #[tokio::test]
    async fn short_rows_leave_optional_fields_empty() {
        let catalog = seeded().await;
        let ring = catalog.find_product("P2").await.unwrap().unwrap();
        assert_eq!(ring.colors.as_deref(), Some("white, black"));
        assert!(ring.shipment.weight.is_none());
    }

    #[tokio::test]
    async fn bad_price_is_a_data_error() {
        let mem = MemTabular::new();
        mem.seed(
            PRODUCTS_TABLE,
            vec![row(&["Id"]), row(&["P1", "Thing", "", "not-a-price"])],
        )
        .await;
        let catalog = CatalogStore::new(mem);
        assert!(catalog.list_products().await.is_err());
    }
}
