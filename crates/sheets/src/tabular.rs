//! The storage seam: a spreadsheet reduced to read/append/update
//! operations over named tables and A1-style ranges.

use async_trait::async_trait;

use crate::error::StoreError;

/// A tabular key-value store with lazily created tables.
///
/// Ranges use A1 notation without the table prefix (`"A:E"`, `"A2:J"`,
/// `"E5"`); implementations combine table and range themselves. Rows are
/// jagged: trailing empty cells may be absent, matching what the Sheets
/// API returns.
#[async_trait]
pub trait Tabular: Send + Sync {
    /// Read all populated rows within `range`.
    async fn read(&self, table: &str, range: &str) -> Result<Vec<Vec<String>>, StoreError>;

    /// Append rows after the last populated row of `range`.
    async fn append(
        &self,
        table: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError>;

    /// Overwrite cells starting at the top-left of `range`.
    async fn update(
        &self,
        table: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError>;

    /// Whether a table with this title exists.
    async fn table_exists(&self, table: &str) -> Result<bool, StoreError>;

    /// Create an empty table with this title.
    async fn create_table(&self, table: &str) -> Result<(), StoreError>;

    /// Cheap reachability check for health reporting.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: Tabular + ?Sized> Tabular for std::sync::Arc<T> {
    async fn read(&self, table: &str, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        (**self).read(table, range).await
    }

    async fn append(
        &self,
        table: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError> {
        (**self).append(table, range, rows).await
    }

    async fn update(
        &self,
        table: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError> {
        (**self).update(table, range, rows).await
    }

    async fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        (**self).table_exists(table).await
    }

    async fn create_table(&self, table: &str) -> Result<(), StoreError> {
        (**self).create_table(table).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }
}

/// Ensure `table` exists, creating it and writing `header` into its first
/// row when absent. Idempotent and safe to race: a create that loses the
/// race is fine as long as the table exists afterwards.
pub async fn ensure_table(
    store: &dyn Tabular,
    table: &str,
    header: &[&str],
) -> Result<(), StoreError> {
    if store.table_exists(table).await? {
        return Ok(());
    }
    if let Err(err) = store.create_table(table).await {
        if store.table_exists(table).await? {
            tracing::debug!(table, "Table created concurrently, continuing");
            return Ok(());
        }
        return Err(err);
    }
    let header_row: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    let range = format!("A1:{}1", column_letter(header.len() - 1));
    store.append(table, &range, vec![header_row]).await
}

/// Letter for a zero-based column index (`0 -> "A"`). Tables here never
/// exceed 26 columns.
pub(crate) fn column_letter(index: usize) -> char {
    debug_assert!(index < 26);
    (b'A' + index as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(0), 'A');
        assert_eq!(column_letter(4), 'E');
        assert_eq!(column_letter(25), 'Z');
    }
}
