//! # Schema Mapper
//!
//! Converts raw worksheet rows into typed records.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RawRow { "Product": "Chess", "Price": "bad", "Extra": "x" }            │
//! │       │                                                                 │
//! │       ▼  map_row(index = 4)                                             │
//! │  Product {                                                              │
//! │      row_index: 4,           ← position in the snapshot                 │
//! │      name: "Chess",                                                     │
//! │      price: "bad",           ← text kept, coerces to 0 when summed      │
//! │      quantity_in_hand: 0,    ← column missing → 0                       │
//! │      reorder: "",            ← column missing → ""                      │
//! │  }                           ← "Extra" ignored                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mapping is total: there is no error path.

use crate::coerce;
use crate::schema::{enquiries, stock, transactions};
use crate::types::{Enquiry, NumericText, Product, RawRow, Record, RowIndex, Transaction};

/// A record type that can be built from one raw row.
pub trait FromRawRow: Record + Sized {
    fn from_raw_row(index: RowIndex, row: &RawRow) -> Self;
}

/// Maps a whole snapshot, attaching each row's position.
pub fn map_rows<R: FromRawRow>(rows: &[RawRow]) -> Vec<R> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| R::from_raw_row(RowIndex(i), row))
        .collect()
}

/// Cell text for a column, empty when the column is missing.
fn cell(row: &RawRow, column: &str) -> String {
    row.get(column).cloned().unwrap_or_default()
}

impl FromRawRow for Product {
    fn from_raw_row(index: RowIndex, row: &RawRow) -> Self {
        Product {
            row_index: index,
            name: cell(row, stock::PRODUCT),
            price: NumericText::new(cell(row, stock::PRICE)),
            quantity_in_hand: coerce::to_integer(&cell(row, stock::QTY_IN_HAND)),
            reorder: cell(row, stock::REORDER),
        }
    }
}

impl FromRawRow for Transaction {
    fn from_raw_row(index: RowIndex, row: &RawRow) -> Self {
        Transaction {
            row_index: index,
            date: cell(row, transactions::DATE),
            sales_item: cell(row, transactions::SALES),
            purchased_item: cell(row, transactions::PURCHASED),
            service_item: cell(row, transactions::SERVICE),
            customer_name: cell(row, transactions::NAME),
            phone: cell(row, transactions::PHONE),
            amount: NumericText::new(cell(row, transactions::AMOUNT)),
            payment_mode: cell(row, transactions::PAYMENT_MODE),
            notes: cell(row, transactions::NOTES),
        }
    }
}

impl FromRawRow for Enquiry {
    fn from_raw_row(index: RowIndex, row: &RawRow) -> Self {
        Enquiry {
            row_index: index,
            date: cell(row, enquiries::DATE),
            customer_name: cell(row, enquiries::CUSTOMER_NAME),
            phone: cell(row, enquiries::PHONE),
            product_detail: cell(row, enquiries::PRODUCT_DETAIL),
            content: cell(row, enquiries::CONTENT),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
