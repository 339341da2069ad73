//! # Repository Module
//!
//! One repository per worksheet, each over the shared store handle.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Dashboard                                                              │
//! │       │                                                                 │
//! │       │  dashboard.stock().sell_one("Chess")                            │
//! │       ▼                                                                 │
//! │  StockRepository                                                        │
//! │  ├── snapshot()         load_all + map_rows                             │
//! │  ├── sell_one(name)     snapshot → plan_sell → update_field             │
//! │  ├── purchase_one(name) snapshot → plan_purchase → update_field         │
//! │  └── add(product)       plan_add_item → append_record                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<dyn RecordStore>   (MemoryStore | CsvStore)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`StockRepository`] - Products, sell/purchase, add item
//! - [`TransactionRepository`] - Day-to-day entries
//! - [`EnquiryRepository`] - Customer enquiries

pub mod enquiry;
pub mod stock;
pub mod transaction;

pub use enquiry::EnquiryRepository;
pub use stock::StockRepository;
pub use transaction::TransactionRepository;

use tracing::debug;

use goldstar_core::mapper::{map_rows, FromRawRow};
use goldstar_core::NewRecord;

use crate::backend::RecordStore;
use crate::error::StoreResult;

/// Reads and maps a whole worksheet.
pub(crate) async fn load_records<R: FromRawRow>(store: &dyn RecordStore) -> StoreResult<Vec<R>> {
    let collection = R::COLLECTION;
    let rows = store.load_all(collection).await?;
    let records = map_rows(&rows);
    debug!(%collection, count = rows.len(), "Mapped snapshot");
    Ok(records)
}

/// Appends one new row in schema order.
pub(crate) async fn append_record<N: NewRecord>(store: &dyn RecordStore, record: &N) -> StoreResult<()> {
    store.append_record(N::COLLECTION, record.to_row()).await
}
