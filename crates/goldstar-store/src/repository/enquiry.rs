//! # Enquiry Repository
//!
//! Customer enquiries, append-only.

use std::sync::Arc;
use tracing::info;

use goldstar_core::{Enquiry, NewEnquiry};

use super::{append_record, load_records};
use crate::backend::RecordStore;
use crate::error::StoreResult;

/// Repository for the enquiry worksheet.
#[derive(Clone)]
pub struct EnquiryRepository {
    store: Arc<dyn RecordStore>,
}

impl EnquiryRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        EnquiryRepository { store }
    }

    pub async fn snapshot(&self) -> StoreResult<Vec<Enquiry>> {
        load_records(self.store.as_ref()).await
    }

    pub async fn add(&self, enquiry: &NewEnquiry) -> StoreResult<()> {
        append_record(self.store.as_ref(), enquiry).await?;
        info!(
            customer = %enquiry.customer_name,
            product = %enquiry.product_detail,
            "Logged enquiry"
        );
        Ok(())
    }
}
