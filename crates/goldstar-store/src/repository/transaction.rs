//! # Transaction Repository
//!
//! The day-to-day worksheet: sales, purchases and services, append-only.

use std::sync::Arc;
use tracing::info;

use goldstar_core::{NewTransaction, Transaction};

use super::{append_record, load_records};
use crate::backend::RecordStore;
use crate::error::StoreResult;

/// Repository for the day-to-day worksheet.
#[derive(Clone)]
pub struct TransactionRepository {
    store: Arc<dyn RecordStore>,
}

impl TransactionRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        TransactionRepository { store }
    }

    /// Loads every entry, in worksheet order.
    pub async fn snapshot(&self) -> StoreResult<Vec<Transaction>> {
        load_records(self.store.as_ref()).await
    }

    /// Appends an entry. The amount is stored exactly as typed.
    pub async fn add(&self, entry: &NewTransaction) -> StoreResult<()> {
        append_record(self.store.as_ref(), entry).await?;
        info!(
            date = %entry.date,
            customer = %entry.customer_name,
            amount = %entry.amount,
            "Added transaction"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
