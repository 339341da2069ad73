//! # In-Memory Record Store
//!
//! Worksheets held in process. Used by tests and demos, and as the reference
//! behaviour for other backends.
//!
//! ## Offline Switch
//! ```text
//! store.set_offline(true)
//!     load_all / append_record / update_field → StoreError::Unavailable
//! store.set_offline(false)
//!     back to normal, data untouched
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use goldstar_core::{Collection, RawRow, RowIndex};

use super::{RecordStore, Worksheet};
use crate::error::{StoreError, StoreResult};

/// Record store backed by in-process worksheets.
///
/// ## Usage
/// ```rust,ignore
/// let store = MemoryStore::new()
///     .with_rows(Collection::Stock, vec![vec!["Chess", "10", "1", "No"]]);
/// let rows = store.load_all(Collection::Stock).await?;
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    sheets: RwLock<HashMap<Collection, Worksheet>>,
    offline: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a store with three empty worksheets.
    pub fn new() -> Self {
        let sheets = Collection::ALL
            .into_iter()
            .map(|c| (c, Worksheet::for_collection(c)))
            .collect();
        MemoryStore {
            sheets: RwLock::new(sheets),
            offline: AtomicBool::new(false),
        }
    }

    /// Appends data rows (schema order) without any checks.
    pub fn with_rows(mut self, collection: Collection, rows: Vec<Vec<&str>>) -> Self {
        let sheet = self
            .sheets
            .get_mut()
            .entry(collection)
            .or_insert_with(|| Worksheet::for_collection(collection));
        sheet.rows.extend(
            rows.into_iter()
                .map(|cells| cells.into_iter().map(String::from).collect()),
        );
        self
    }

    /// Simulates the workbook becoming unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    /// Positional copy of a worksheet's data rows.
    pub async fn rows(&self, collection: Collection) -> Vec<Vec<String>> {
        self.sheets
            .read()
            .await
            .get(&collection)
            .map(|sheet| sheet.rows.clone())
            .unwrap_or_default()
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.is_offline() {
            return Err(StoreError::Unavailable("in-memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load_all(&self, collection: Collection) -> StoreResult<Vec<RawRow>> {
        self.ensure_online()?;
        let sheets = self.sheets.read().await;
        let rows = sheets
            .get(&collection)
            .map(Worksheet::raw_rows)
            .unwrap_or_default();
        debug!(%collection, count = rows.len(), "Loaded in-memory worksheet");
        Ok(rows)
    }

    async fn append_record(&self, collection: Collection, values: Vec<String>) -> StoreResult<()> {
        self.ensure_online()?;
        let mut sheets = self.sheets.write().await;
        sheets
            .entry(collection)
            .or_insert_with(|| Worksheet::for_collection(collection))
            .append(collection, values)
    }

    async fn update_field(
        &self,
        collection: Collection,
        row: RowIndex,
        field_ordinal: usize,
        value: String,
    ) -> StoreResult<()> {
        self.ensure_online()?;
        let mut sheets = self.sheets.write().await;
        match sheets.get_mut(&collection) {
            Some(sheet) => sheet.update(collection, row, field_ordinal, value),
            None => Err(StoreError::RowNotFound { collection, row }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new().with_rows(
            Collection::Stock,
            vec![vec!["Chess", "10", "1", "No"], vec!["Ludo", "5", "0", "Yes"]],
        )
    }

    #[tokio::test]
    async fn test_load_all_keys_by_header() {
        let rows = store().load_all(Collection::Stock).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["Product"], "Ludo");
        assert!(store()
            .load_all(Collection::Enquiries)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_append_and_update() {
        let store = store();
        store
            .append_record(
                Collection::Stock,
                vec!["Uno".into(), "3".into(), "9".into(), String::new()],
            )
            .await
            .unwrap();
        store
            .update_field(Collection::Stock, RowIndex(0), 2, "0".into())
            .await
            .unwrap();

        let rows = store.rows(Collection::Stock).await;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][2], "0");
        assert_eq!(rows[2][0], "Uno");
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let result = store()
            .update_field(Collection::Stock, RowIndex(5), 2, "1".into())
            .await;
        assert!(matches!(result, Err(StoreError::RowNotFound { .. })));
    }

    #[tokio::test]
    async fn test_offline_store_is_unavailable() {
        let store = store();
        store.set_offline(true);

        assert!(matches!(
            store.load_all(Collection::Stock).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store
                .update_field(Collection::Stock, RowIndex(0), 2, "0".into())
                .await,
            Err(StoreError::Unavailable(_))
        ));

        store.set_offline(false);
        assert_eq!(store.rows(Collection::Stock).await[0][2], "1");
    }
}
