//! # Domain Types
//!
//! Typed records for the three worksheets, plus the inputs used to append
//! new rows.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │    Enquiry      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  row_index      │   │  row_index      │   │  row_index      │       │
//! │  │  name (key)     │   │  date           │   │  date           │       │
//! │  │  price          │   │  sales/purch/.. │   │  customer_name  │       │
//! │  │  qty_in_hand    │   │  amount         │   │  product_detail │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  All three implement `Record`, the seam used by filter and analytics.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row Identity
//! Worksheets have no id column. Every loaded record carries the
//! [`RowIndex`] it was read from, so a later write can address the same row
//! without searching for it again.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use ts_rs::TS;

use crate::coerce;
use crate::money::Money;
use crate::schema::{enquiries, stock, transactions, Collection, Schema};

/// One worksheet row as delivered by a record store: column name → cell text.
pub type RawRow = HashMap<String, String>;

// =============================================================================
// Row Index
// =============================================================================

/// 0-based position of a record within its loaded snapshot.
///
/// Translating this into a physical worksheet row (header offset, 1-based
/// numbering) is the record store's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RowIndex(pub usize);

impl RowIndex {
    #[inline]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Numeric Text
// =============================================================================

/// A numeric cell that keeps its original text.
///
/// Filtering matches against the text exactly as typed (`"50.00"`), while
/// aggregation reads the coerced value, which is 0 for malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NumericText(String);

impl NumericText {
    pub fn new(raw: impl Into<String>) -> Self {
        NumericText(raw.into())
    }

    /// The cell text as read.
    pub fn raw(&self) -> &str {
        &self.0
    }

    pub fn as_decimal(&self) -> f64 {
        coerce::to_decimal(&self.0)
    }

    pub fn as_money(&self) -> Money {
        coerce::to_money(&self.0)
    }

    /// Returns true if the text parses as a finite number.
    pub fn is_numeric(&self) -> bool {
        coerce::parse_decimal(&self.0).is_some()
    }
}

impl From<&str> for NumericText {
    fn from(raw: &str) -> Self {
        NumericText::new(raw)
    }
}

// =============================================================================
// Record Trait
// =============================================================================

/// A typed worksheet row that filter and analytics can address by column.
pub trait Record {
    /// The collection this record type is read from.
    const COLLECTION: Collection;

    /// Position of the record in its snapshot.
    fn row_index(&self) -> RowIndex;

    /// String form of a column, or `None` if this record type has no such
    /// column. Numeric columns are stringified.
    fn field_text(&self, column: &str) -> Option<Cow<'_, str>>;

    fn schema() -> &'static Schema {
        Self::COLLECTION.schema()
    }
}

/// Input for a new worksheet row, flattened in schema column order.
pub trait NewRecord {
    const COLLECTION: Collection;

    fn to_row(&self) -> Vec<String>;
}

// =============================================================================
// Product
// =============================================================================

/// A stock line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub row_index: RowIndex,

    /// Display name; doubles as the identity within the worksheet.
    pub name: String,

    /// Unit price as typed.
    pub price: NumericText,

    /// Current quantity, 0 when the cell is malformed.
    pub quantity_in_hand: i64,

    /// Free-text reorder note ("Yes", "No", "call supplier", ...). Advisory only.
    pub reorder: String,
}

impl Product {
    /// Returns the unit price as Money (zero when malformed).
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.price.as_money()
    }

    /// Value of the units on hand.
    pub fn stock_value(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity_in_hand)
    }

    /// Checks if one unit can be sold.
    #[inline]
    pub fn can_sell(&self) -> bool {
        self.quantity_in_hand > 0
    }
}

impl Record for Product {
    const COLLECTION: Collection = Collection::Stock;

    fn row_index(&self) -> RowIndex {
        self.row_index
    }

    fn field_text(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            stock::PRODUCT => Some(Cow::Borrowed(&self.name)),
            stock::PRICE => Some(Cow::Borrowed(self.price.raw())),
            stock::QTY_IN_HAND => Some(Cow::Owned(self.quantity_in_hand.to_string())),
            stock::REORDER => Some(Cow::Borrowed(&self.reorder)),
            _ => None,
        }
    }
}

/// Input for the "Add Item" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub quantity: i64,
    pub reorder: String,
}

impl NewRecord for NewProduct {
    const COLLECTION: Collection = Collection::Stock;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.price.to_string(),
            self.quantity.to_string(),
            self.reorder.clone(),
        ]
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A day-to-day sale, purchase or service entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub row_index: RowIndex,
    /// Free-form date text, usually `YYYY-MM-DD`.
    pub date: String,
    pub sales_item: String,
    pub purchased_item: String,
    pub service_item: String,
    pub customer_name: String,
    pub phone: String,
    pub amount: NumericText,
    pub payment_mode: String,
    pub notes: String,
}

impl Record for Transaction {
    const COLLECTION: Collection = Collection::Transactions;

    fn row_index(&self) -> RowIndex {
        self.row_index
    }

    fn field_text(&self, column: &str) -> Option<Cow<'_, str>> {
        let text = match column {
            transactions::DATE => &self.date,
            transactions::SALES => &self.sales_item,
            transactions::PURCHASED => &self.purchased_item,
            transactions::SERVICE => &self.service_item,
            transactions::NAME => &self.customer_name,
            transactions::PHONE => &self.phone,
            transactions::AMOUNT => self.amount.raw(),
            transactions::PAYMENT_MODE => &self.payment_mode,
            transactions::NOTES => &self.notes,
            _ => return None,
        };
        Some(Cow::Borrowed(text))
    }
}

/// Input for the "Add Entry" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub sales_item: String,
    pub purchased_item: String,
    pub service_item: String,
    pub customer_name: String,
    pub phone: String,
    /// Typed as free text, exactly like the worksheet column.
    pub amount: String,
    pub payment_mode: String,
    pub notes: String,
}

impl NewRecord for NewTransaction {
    const COLLECTION: Collection = Collection::Transactions;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.date.format("%Y-%m-%d").to_string(),
            self.sales_item.clone(),
            self.purchased_item.clone(),
            self.service_item.clone(),
            self.customer_name.clone(),
            self.phone.clone(),
            self.amount.clone(),
            self.payment_mode.clone(),
            self.notes.clone(),
        ]
    }
}

// =============================================================================
// Enquiry
// =============================================================================

/// A logged customer enquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub row_index: RowIndex,
    pub date: String,
    pub customer_name: String,
    pub phone: String,
    pub product_detail: String,
    pub content: String,
}

impl Record for Enquiry {
    const COLLECTION: Collection = Collection::Enquiries;

    fn row_index(&self) -> RowIndex {
        self.row_index
    }

    fn field_text(&self, column: &str) -> Option<Cow<'_, str>> {
        let text = match column {
            enquiries::DATE => &self.date,
            enquiries::CUSTOMER_NAME => &self.customer_name,
            enquiries::PHONE => &self.phone,
            enquiries::PRODUCT_DETAIL => &self.product_detail,
            enquiries::CONTENT => &self.content,
            _ => return None,
        };
        Some(Cow::Borrowed(text))
    }
}

/// Input for the "Add Enquiry" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewEnquiry {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub customer_name: String,
    pub phone: String,
    pub product_detail: String,
    pub content: String,
}

impl NewRecord for NewEnquiry {
    const COLLECTION: Collection = Collection::Enquiries;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.date.format("%Y-%m-%d").to_string(),
            self.customer_name.clone(),
            self.phone.clone(),
            self.product_detail.clone(),
            self.content.clone(),
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn chess() -> Product {
        Product {
            row_index: RowIndex(0),
            name: "Chess".to_string(),
            price: NumericText::new("249.50"),
            quantity_in_hand: 2,
            reorder: "No".to_string(),
        }
    }

    #[test]
    fn test_product_value_and_can_sell() {
        let product = chess();
        assert_eq!(product.stock_value().cents(), 49900);
        assert!(product.can_sell());

        let empty = Product {
            quantity_in_hand: 0,
            ..chess()
        };
        assert!(!empty.can_sell());
    }

    #[test]
    fn test_malformed_price_keeps_raw_text() {
        let product = Product {
            price: NumericText::new("bad"),
            ..chess()
        };
        assert_eq!(product.unit_price(), Money::zero());
        assert!(!product.price.is_numeric());
        assert_eq!(
            product.field_text(stock::PRICE).as_deref(),
            Some("bad")
        );
    }

    #[test]
    fn test_field_text_unknown_column() {
        assert!(chess().field_text("SKU").is_none());
        assert_eq!(
            chess().field_text(stock::QTY_IN_HAND).as_deref(),
            Some("2")
        );
    }

    #[test]
    fn test_new_rows_follow_schema_width() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let product = NewProduct {
            name: "Carrom".to_string(),
            price: Money::from_cents(120000),
            quantity: 3,
            reorder: "No".to_string(),
        };
        assert_eq!(product.to_row(), vec!["Carrom", "1200.00", "3", "No"]);
        assert_eq!(product.to_row().len(), NewProduct::COLLECTION.schema().width());

        let entry = NewTransaction {
            date,
            sales_item: "Uno".to_string(),
            purchased_item: String::new(),
            service_item: String::new(),
            customer_name: "Asha".to_string(),
            phone: "98450".to_string(),
            amount: "150".to_string(),
            payment_mode: "UPI".to_string(),
            notes: String::new(),
        };
        let row = entry.to_row();
        assert_eq!(row[0], "2024-03-09");
        assert_eq!(row.len(), NewTransaction::COLLECTION.schema().width());

        let enquiry = NewEnquiry {
            date,
            customer_name: "Ravi".to_string(),
            phone: "90000".to_string(),
            product_detail: "PS5".to_string(),
            content: "Price?".to_string(),
        };
        assert_eq!(enquiry.to_row().len(), NewEnquiry::COLLECTION.schema().width());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let json = serde_json::to_value(chess()).unwrap();
        assert_eq!(json["quantityInHand"], 2);
        assert_eq!(json["price"], "249.50");
        assert_eq!(json["rowIndex"], 0);
    }

    #[test]
    fn test_numeric_text_is_a_plain_string() {
        assert_eq!(NumericText::inline(), "string");

        let text: NumericText = serde_json::from_str(r#""50.00""#).unwrap();
        assert_eq!(text.raw(), "50.00");
        assert_eq!(serde_json::to_string(&text).unwrap(), r#""50.00""#);
    }
}
