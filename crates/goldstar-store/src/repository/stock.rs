//! # Stock Repository
//!
//! Applies inventory ledger plans to the stock worksheet.
//!
//! ## Sell One
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sell_one("Chess")                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_all(Stock) ─────────────── one read                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_sell(snapshot, "Chess")                                           │
//! │       │         └── InsufficientStock → returned, nothing written       │
//! │       ▼                                                                 │
//! │  update_field(Stock, row, QTY IN HAND, qty - 1) ── at most one write    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No re-read happens between the two steps. Two tills selling the last unit
//! at the same moment can both succeed; the last write wins.

use std::sync::Arc;
use tracing::{info, warn};

use goldstar_core::ledger::{plan_add_item, plan_purchase, plan_sell, StockMutation};
use goldstar_core::{CoreError, NewProduct, NewRecord, Product};

use super::load_records;
use crate::backend::RecordStore;
use crate::error::{DashboardResult, StoreResult};

/// Repository for the stock worksheet.
#[derive(Clone)]
pub struct StockRepository {
    store: Arc<dyn RecordStore>,
}

impl StockRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        StockRepository { store }
    }

    /// Loads every product, in worksheet order.
    pub async fn snapshot(&self) -> StoreResult<Vec<Product>> {
        load_records(self.store.as_ref()).await
    }

    /// Sells one unit of the first product with this exact name.
    ///
    /// ## Errors
    /// * `CoreError::ProductNotFound` / `InsufficientStock` - nothing written
    /// * `StoreError::*` - from the read or the write, unchanged
    pub async fn sell_one(&self, name: &str) -> DashboardResult<StockMutation> {
        let snapshot = self.snapshot().await?;

        let mutation = match plan_sell(&snapshot, name) {
            Ok(m) => m,
            Err(e @ CoreError::InsufficientStock { .. }) => {
                warn!(product = %name, "Sell rejected: out of stock");
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        self.apply(&mutation).await?;
        info!(
            product = %mutation.product,
            from = mutation.previous_quantity,
            to = mutation.new_quantity,
            "Sold one unit"
        );
        Ok(mutation)
    }

    /// Receives one unit of the first product with this exact name.
    pub async fn purchase_one(&self, name: &str) -> DashboardResult<StockMutation> {
        let snapshot = self.snapshot().await?;
        let mutation = plan_purchase(&snapshot, name)?;

        self.apply(&mutation).await?;
        info!(
            product = %mutation.product,
            from = mutation.previous_quantity,
            to = mutation.new_quantity,
            "Purchased one unit"
        );
        Ok(mutation)
    }

    /// Validates and appends a new product row.
    ///
    /// A name already present is appended again; lookups keep finding the
    /// older row.
    pub async fn add(&self, product: &NewProduct) -> DashboardResult<()> {
        let row = plan_add_item(product)?;
        self.store.append_record(NewProduct::COLLECTION, row).await?;
        info!(product = %product.name, quantity = product.quantity, "Added product");
        Ok(())
    }

    async fn apply(&self, mutation: &StockMutation) -> StoreResult<()> {
        self.store
            .update_field(
                mutation.collection(),
                mutation.row_index,
                mutation.field_ordinal,
                mutation.value(),
            )
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
