//! # CSV Workbook Store
//!
//! A workbook is a directory holding one CSV file per worksheet.
//!
//! ## Layout & Addressing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ~/.local/share/goldstar/Gold Star Games/                               │
//! │  ├── Games Stock.csv                                                    │
//! │  ├── new day to day.csv                                                 │
//! │  └── Enquiry.csv                                                        │
//! │                                                                         │
//! │  Games Stock.csv                                                        │
//! │  line 1   Product,Price,QTY IN HAND,REORDER      ← header               │
//! │  line 2   Chess,10,1,No                          ← RowIndex(0)          │
//! │  line 3   Ludo,5,0,Yes                           ← RowIndex(1)          │
//! │                                                                         │
//! │  physical line = RowIndex + 2                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes are read-modify-write of the whole worksheet file, serialized by a
//! single mutex per store. The new file is written next to the old one and
//! renamed over it, so a concurrent `load_all` sees either the previous
//! worksheet or the next one, never a partial file. Another process writing
//! the same files is not coordinated with.

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, info};

use goldstar_core::{Collection, RawRow, RowIndex};

use super::{RecordStore, Worksheet};
use crate::config::WorksheetSettings;
use crate::error::{StoreError, StoreResult};

/// Record store over a directory of CSV worksheets.
#[derive(Debug)]
pub struct CsvStore {
    dir: PathBuf,
    worksheets: WorksheetSettings,
    write_lock: Mutex<()>,
}

impl CsvStore {
    /// Opens a workbook directory. Nothing is touched until the first call.
    pub fn new(dir: impl Into<PathBuf>, worksheets: WorksheetSettings) -> Self {
        CsvStore {
            dir: dir.into(),
            worksheets,
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a collection.
    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir
            .join(format!("{}.csv", self.worksheets.name_for(collection)))
    }

    /// Creates the directory and any missing worksheet with its header row.
    ///
    /// Existing worksheets are left as they are.
    pub async fn initialize(&self) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let _guard = self.write_lock.lock().await;
        for collection in Collection::ALL {
            let path = self.path_for(collection);
            if tokio::fs::try_exists(&path).await? {
                debug!(?path, "Worksheet exists");
                continue;
            }
            write_sheet(&path, &Worksheet::for_collection(collection)).await?;
            info!(?path, %collection, "Created worksheet");
        }
        Ok(())
    }

    async fn read(&self, collection: Collection) -> StoreResult<Worksheet> {
        read_sheet(&self.path_for(collection)).await
    }
}

async fn read_sheet(path: &Path) -> StoreResult<Worksheet> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| StoreError::Unavailable(format!("{}: {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(String::from).collect());
    }

    Ok(Worksheet { header, rows })
}

async fn write_sheet(path: &Path, sheet: &Worksheet) -> StoreResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&sheet.header)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || replace_file(&path, &bytes))
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
}

/// Writes a sibling temp file and renames it over `path`.
fn replace_file(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| StoreError::from(e.error))?;
    Ok(())
}

#[async_trait]
impl RecordStore for CsvStore {
    async fn load_all(&self, collection: Collection) -> StoreResult<Vec<RawRow>> {
        let sheet = self.read(collection).await?;
        debug!(%collection, count = sheet.rows.len(), "Loaded worksheet");
        Ok(sheet.raw_rows())
    }

    async fn append_record(&self, collection: Collection, values: Vec<String>) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut sheet = self.read(collection).await?;
        sheet.append(collection, values)?;
        write_sheet(&self.path_for(collection), &sheet).await?;

        debug!(%collection, line = sheet.rows.len() + 1, "Appended row");
        Ok(())
    }

    async fn update_field(
        &self,
        collection: Collection,
        row: RowIndex,
        field_ordinal: usize,
        value: String,
    ) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut sheet = self.read(collection).await?;
        sheet.update(collection, row, field_ordinal, value)?;
        write_sheet(&self.path_for(collection), &sheet).await?;

        debug!(
            %collection,
            line = row.get() + 2,
            column = field_ordinal + 1,
            "Updated cell"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn workbook() -> (TempDir, CsvStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("book"), WorksheetSettings::default());
        store.initialize().await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_initialize_writes_headers() {
        let (_dir, store) = workbook().await;

        let text = std::fs::read_to_string(store.path_for(Collection::Stock)).unwrap();
        assert_eq!(text, "Product,Price,QTY IN HAND,REORDER\n");
        assert!(store.path_for(Collection::Transactions).ends_with("new day to day.csv"));
        assert!(store.load_all(Collection::Enquiries).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_rows() {
        let (_dir, store) = workbook().await;
        store
            .append_record(
                Collection::Stock,
                vec!["Chess".into(), "10".into(), "1".into(), "No".into()],
            )
            .await
            .unwrap();

        store.initialize().await.unwrap();
        assert_eq!(store.load_all(Collection::Stock).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_skips_header_line() {
        let (_dir, store) = workbook().await;
        for (name, qty) in [("Chess", "1"), ("Ludo, Deluxe", "4")] {
            store
                .append_record(
                    Collection::Stock,
                    vec![name.into(), "10".into(), qty.into(), String::new()],
                )
                .await
                .unwrap();
        }

        store
            .update_field(Collection::Stock, RowIndex(1), 2, "3".into())
            .await
            .unwrap();

        let text = std::fs::read_to_string(store.path_for(Collection::Stock)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Chess,10,1,");
        assert_eq!(lines[2], "\"Ludo, Deluxe\",10,3,");

        let rows = store.load_all(Collection::Stock).await.unwrap();
        assert_eq!(rows[1]["Product"], "Ludo, Deluxe");
        assert_eq!(rows[1]["QTY IN HAND"], "3");
    }

    #[tokio::test]
    async fn test_update_out_of_range() {
        let (_dir, store) = workbook().await;
        let result = store
            .update_field(Collection::Stock, RowIndex(0), 2, "1".into())
            .await;
        assert!(matches!(result, Err(StoreError::RowNotFound { .. })));
    }

    #[tokio::test]
    async fn test_append_wrong_width() {
        let (_dir, store) = workbook().await;
        let result = store
            .append_record(Collection::Enquiries, vec!["2024-01-01".into()])
            .await;
        assert!(matches!(result, Err(StoreError::SchemaMismatch { .. })));
    }

    #[tokio::test]
    async fn test_missing_workbook_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("absent"), WorksheetSettings::default());
        assert!(matches!(
            store.load_all(Collection::Stock).await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_reads_hand_edited_sheet() {
        let (_dir, store) = workbook().await;
        std::fs::write(
            store.path_for(Collection::Stock),
            "Product,Price,QTY IN HAND,REORDER,Shelf\nChess,bad,2\n",
        )
        .unwrap();

        let rows = store.load_all(Collection::Stock).await.unwrap();
        assert_eq!(rows[0]["Price"], "bad");
        assert_eq!(rows[0]["REORDER"], "");
        assert_eq!(rows[0]["Shelf"], "");

        let result = store
            .update_field(Collection::Stock, RowIndex(0), 2, "1".into())
            .await;
        assert!(matches!(result, Err(StoreError::SchemaMismatch { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reads_during_writes_see_whole_worksheets() {
        let (_dir, store) = workbook().await;

        let mut text = String::from("Product,Price,QTY IN HAND,REORDER\n");
        for i in 0..2000 {
            text.push_str(&format!("Item {},10,5,No\n", i));
        }
        std::fs::write(store.path_for(Collection::Stock), text).unwrap();

        let store = Arc::new(store);
        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..100 {
                    store
                        .update_field(Collection::Stock, RowIndex(i), 2, "6".into())
                        .await?;
                }
                Ok::<_, StoreError>(())
            })
        };

        let mut reads = 0;
        while !writer.is_finished() || reads == 0 {
            let rows = store.load_all(Collection::Stock).await.unwrap();
            assert_eq!(rows.len(), 2000);
            assert_eq!(rows[1999]["Product"], "Item 1999");
            assert_eq!(rows[1999]["QTY IN HAND"], "5");
            assert_eq!(rows[1999]["REORDER"], "No");
            reads += 1;
            tokio::task::yield_now().await;
        }
        writer.await.unwrap().unwrap();

        let rows = store.load_all(Collection::Stock).await.unwrap();
        assert_eq!(rows[99]["QTY IN HAND"], "6");
        assert_eq!(rows[100]["QTY IN HAND"], "5");
    }

    #[tokio::test]
    async fn test_writes_leave_no_temp_files() {
        let (_dir, store) = workbook().await;
        store
            .append_record(
                Collection::Enquiries,
                vec![
                    "2024-01-01".into(),
                    "Ravi".into(),
                    "90000".into(),
                    "PS5".into(),
                    String::new(),
                ],
            )
            .await
            .unwrap();

        let files = std::fs::read_dir(store.dir()).unwrap().count();
        assert_eq!(files, Collection::ALL.len());
    }
}
