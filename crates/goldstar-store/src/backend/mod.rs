//! # Record Store Adapter
//!
//! The single seam between the dashboard and wherever the worksheets live.
//!
//! ## Adapter Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       RecordStore                                       │
//! │                                                                         │
//! │  load_all(collection)                     → Vec<RawRow>                 │
//! │      StoreError::Unavailable                                            │
//! │                                                                         │
//! │  append_record(collection, values)        → ()                          │
//! │      StoreError::Unavailable | SchemaMismatch                           │
//! │                                                                         │
//! │  update_field(collection, row, ordinal, value) → ()                     │
//! │      StoreError::Unavailable | RowNotFound | SchemaMismatch             │
//! │                                                                         │
//! │  ┌──────────────┐        ┌──────────────┐                               │
//! │  │ MemoryStore  │        │  CsvStore    │   (one impl per backend)      │
//! │  │ tests, demos │        │ workbook dir │                               │
//! │  └──────────────┘        └──────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `row` is the 0-based position in the last `load_all` snapshot. Each
//! backend maps it to its own physical addressing (the CSV backend skips the
//! header line). Backends never retry.

pub mod csv_store;
pub mod memory;

use async_trait::async_trait;

use goldstar_core::{Collection, RawRow, RowIndex};

use crate::error::{StoreError, StoreResult};

pub use self::csv_store::CsvStore;
pub use self::memory::MemoryStore;

// =============================================================================
// Trait
// =============================================================================

/// Read-all / append-row / update-cell access to the three worksheets.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Reads every data row of a worksheet, in worksheet order.
    async fn load_all(&self, collection: Collection) -> StoreResult<Vec<RawRow>>;

    /// Appends one row. `values` follow the collection's schema order.
    async fn append_record(&self, collection: Collection, values: Vec<String>) -> StoreResult<()>;

    /// Overwrites a single cell.
    async fn update_field(
        &self,
        collection: Collection,
        row: RowIndex,
        field_ordinal: usize,
        value: String,
    ) -> StoreResult<()>;
}

// =============================================================================
// Worksheet
// =============================================================================

/// A header plus positional data rows; shared by both backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Worksheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Worksheet {
    /// An empty worksheet carrying the schema header.
    pub fn for_collection(collection: Collection) -> Self {
        Worksheet {
            header: collection
                .schema()
                .header()
                .into_iter()
                .map(String::from)
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Rows keyed by header. Short rows yield empty cells.
    pub fn raw_rows(&self) -> Vec<RawRow> {
        self.rows
            .iter()
            .map(|cells| {
                self.header
                    .iter()
                    .enumerate()
                    .map(|(i, column)| (column.clone(), cells.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect()
    }

    /// Positional writes need the header to be the schema header.
    fn ensure_schema_header(&self, collection: Collection) -> StoreResult<()> {
        let expected = collection.schema().header();
        if self.header.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(StoreError::schema_mismatch(
                collection,
                format!("header {:?} does not match {:?}", self.header, expected),
            ));
        }
        Ok(())
    }

    pub fn append(&mut self, collection: Collection, values: Vec<String>) -> StoreResult<()> {
        self.ensure_schema_header(collection)?;
        if values.len() != self.header.len() {
            return Err(StoreError::schema_mismatch(
                collection,
                format!("expected {} values, got {}", self.header.len(), values.len()),
            ));
        }
        self.rows.push(values);
        Ok(())
    }

    pub fn update(
        &mut self,
        collection: Collection,
        row: RowIndex,
        field_ordinal: usize,
        value: String,
    ) -> StoreResult<()> {
        self.ensure_schema_header(collection)?;
        if field_ordinal >= self.header.len() {
            return Err(StoreError::schema_mismatch(
                collection,
                format!("column {} is outside the header", field_ordinal),
            ));
        }

        let width = self.header.len();
        let cells = self
            .rows
            .get_mut(row.get())
            .ok_or(StoreError::RowNotFound { collection, row })?;
        if cells.len() < width {
            cells.resize(width, String::new());
        }
        cells[field_ordinal] = value;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_sheet() -> Worksheet {
        let mut sheet = Worksheet::for_collection(Collection::Stock);
        sheet.rows.push(vec!["Chess".into(), "10".into(), "1".into(), "No".into()]);
        sheet.rows.push(vec!["Ludo".into(), "5".into()]);
        sheet
    }

    #[test]
    fn test_raw_rows_pad_short_rows() {
        let rows = stock_sheet().raw_rows();
        assert_eq!(rows[0]["QTY IN HAND"], "1");
        assert_eq!(rows[1]["QTY IN HAND"], "");
    }

    #[test]
    fn test_append_checks_width() {
        let mut sheet = stock_sheet();
        let err = sheet
            .append(Collection::Stock, vec!["Uno".into(), "3".into()])
            .unwrap_err();
        assert!(matches!(err, StoreError::SchemaMismatch { .. }));

        sheet
            .append(
                Collection::Stock,
                vec!["Uno".into(), "3".into(), "4".into(), String::new()],
            )
            .unwrap();
        assert_eq!(sheet.rows.len(), 3);
    }

    #[test]
    fn test_update_addresses_cell() {
        let mut sheet = stock_sheet();
        sheet
            .update(Collection::Stock, RowIndex(1), 2, "7".into())
            .unwrap();
        assert_eq!(sheet.rows[1], vec!["Ludo", "5", "7", ""]);

        assert!(matches!(
            sheet.update(Collection::Stock, RowIndex(2), 2, "1".into()),
            Err(StoreError::RowNotFound { .. })
        ));
        assert!(matches!(
            sheet.update(Collection::Stock, RowIndex(0), 4, "1".into()),
            Err(StoreError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_foreign_header_rejects_writes() {
        let mut sheet = Worksheet {
            header: vec!["Item".into(), "Cost".into()],
            rows: vec![vec!["Chess".into(), "10".into()]],
        };
        assert_eq!(sheet.raw_rows()[0]["Item"], "Chess");
        assert!(matches!(
            sheet.update(Collection::Stock, RowIndex(0), 1, "1".into()),
            Err(StoreError::SchemaMismatch { .. })
        ));
    }
}
