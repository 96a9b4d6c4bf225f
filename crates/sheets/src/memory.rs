//! In-memory [`Tabular`] implementation backing unit and API tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::tabular::Tabular;

/// A spreadsheet held in process memory. Tables are dense row-major grids;
/// cells outside any write so far read back as absent.
#[derive(Default)]
pub struct MemTabular {
    tables: RwLock<HashMap<String, Vec<Vec<String>>>>,
}

/// A parsed A1 range: 1-based start row and 0-based start column, plus an
/// optional inclusive end row (`None` for open-ended column ranges).
struct Range {
    start_row: usize,
    start_col: usize,
    end_row: Option<usize>,
}

fn parse_col(s: &str) -> Result<usize, StoreError> {
    let mut col = 0usize;
    for c in s.chars() {
        if !c.is_ascii_uppercase() {
            return Err(StoreError::BadCell(format!("bad column in range: {s}")));
        }
        col = col * 26 + (c as usize - 'A' as usize + 1);
    }
    if col == 0 {
        return Err(StoreError::BadCell(format!("empty column in range: {s}")));
    }
    Ok(col - 1)
}

/// Parse a cell reference like `"E5"` or a bare column like `"A"` into
/// (column, optional row).
fn parse_cell(s: &str) -> Result<(usize, Option<usize>), StoreError> {
    let split = s.find(|c: char| c.is_ascii_digit()).unwrap_or(s.len());
    let (letters, digits) = s.split_at(split);
    let col = parse_col(letters)?;
    if digits.is_empty() {
        return Ok((col, None));
    }
    let row: usize = digits
        .parse()
        .map_err(|_| StoreError::BadCell(format!("bad row in range: {s}")))?;
    if row == 0 {
        return Err(StoreError::BadCell(format!("row 0 in range: {s}")));
    }
    Ok((col, Some(row)))
}

fn parse_range(range: &str) -> Result<Range, StoreError> {
    let (start, end) = match range.split_once(':') {
        Some((a, b)) => (a, Some(b)),
        None => (range, None),
    };
    let (start_col, start_row) = parse_cell(start)?;
    let end_row = match end {
        Some(e) => parse_cell(e)?.1,
        None => start_row,
    };
    Ok(Range {
        start_row: start_row.unwrap_or(1),
        start_col,
        end_row,
    })
}

impl MemTabular {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table wholesale, replacing any existing contents.
    pub async fn seed(&self, table: &str, rows: Vec<Vec<String>>) {
        self.tables.write().await.insert(table.to_string(), rows);
    }
}

#[async_trait]
impl Tabular for MemTabular {
    async fn read(&self, table: &str, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let range = parse_range(range)?;
        let tables = self.tables.read().await;
        let Some(grid) = tables.get(table) else {
            return Err(StoreError::Api {
                status: 400,
                body: format!("no such table: {table}"),
            });
        };
        let mut out = Vec::new();
        for (i, row) in grid.iter().enumerate() {
            let sheet_row = i + 1;
            if sheet_row < range.start_row {
                continue;
            }
            if let Some(end) = range.end_row {
                if sheet_row > end {
                    break;
                }
            }
            let cells: Vec<String> = row.iter().skip(range.start_col).cloned().collect();
            out.push(cells);
        }
        // The Sheets API drops trailing empty rows from responses.
        while out.last().is_some_and(|r| r.iter().all(|c| c.is_empty())) {
            out.pop();
        }
        Ok(out)
    }

    async fn append(
        &self,
        table: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError> {
        let range = parse_range(range)?;
        let mut tables = self.tables.write().await;
        let grid = tables.entry(table.to_string()).or_default();
        for row in rows {
            let mut cells = vec![String::new(); range.start_col];
            cells.extend(row);
            grid.push(cells);
        }
        Ok(())
    }

    async fn update(
        &self,
        table: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError> {
        let range = parse_range(range)?;
        let mut tables = self.tables.write().await;
        let grid = tables.entry(table.to_string()).or_default();
        for (offset, row) in rows.into_iter().enumerate() {
            let idx = range.start_row - 1 + offset;
            while grid.len() <= idx {
                grid.push(Vec::new());
            }
            let target = &mut grid[idx];
            for (c, cell) in row.into_iter().enumerate() {
                let col = range.start_col + c;
                while target.len() <= col {
                    target.push(String::new());
                }
                target[col] = cell;
            }
        }
        Ok(())
    }

    async fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.contains_key(table))
    }

    async fn create_table(&self, table: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(table) {
            return Err(StoreError::Api {
                status: 400,
                body: format!("table already exists: {table}"),
            });
        }
        tables.insert(table.to_string(), Vec::new());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn read_skips_rows_before_range_start() {
        let mem = MemTabular::new();
        mem.seed(
            "T",
            vec![row(&["header"]), row(&["first"]), row(&["second"])],
        )
        .await;
        let rows = mem.read("T", "A2:J").await.unwrap();
        assert_eq!(rows, vec![row(&["first"]), row(&["second"])]);
    }

    #[tokio::test]
    async fn update_targets_a_single_cell() {
        let mem = MemTabular::new();
        mem.seed("T", vec![row(&["a", "b"]), row(&["c", "d"])]).await;
        mem.update("T", "B2", vec![row(&["x"])]).await.unwrap();
        let rows = mem.read("T", "A:B").await.unwrap();
        assert_eq!(rows[1], row(&["c", "x"]));
    }

    #[tokio::test]
    async fn update_extends_short_rows() {
        let mem = MemTabular::new();
        mem.seed("T", vec![row(&["a"])]).await;
        mem.update("T", "E1", vec![row(&["paid"])]).await.unwrap();
        let rows = mem.read("T", "A:E").await.unwrap();
        assert_eq!(rows[0], row(&["a", "", "", "", "paid"]));
    }

    #[tokio::test]
    async fn append_lands_after_existing_rows() {
        let mem = MemTabular::new();
        mem.create_table("T").await.unwrap();
        mem.append("T", "A:B", vec![row(&["1", "2"])]).await.unwrap();
        mem.append("T", "A:B", vec![row(&["3", "4"])]).await.unwrap();
        let rows = mem.read("T", "A:B").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], row(&["3", "4"]));
    }

    #[tokio::test]
    async fn read_unknown_table_errors() {
        let mem = MemTabular::new();
        assert!(mem.read("missing", "A:B").await.is_err());
    }

    #[tokio::test]
    async fn ensure_table_writes_header_once() {
        let mem = MemTabular::new();
        crate::tabular::ensure_table(&mem, "T", &["Id", "Name"])
            .await
            .unwrap();
        crate::tabular::ensure_table(&mem, "T", &["Id", "Name"])
            .await
            .unwrap();
        let rows = mem.read("T", "A:B").await.unwrap();
        assert_eq!(rows, vec![row(&["Id", "Name"])]);
    }
}
