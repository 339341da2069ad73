//! # Collection Schemas
//!
//! One explicit descriptor per worksheet. The mapper, the ledger, the filter
//! engine and the analytics all name columns through this module, so renaming
//! a worksheet column is a single-point change.
//!
//! ## Worksheet Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stock ("Games Stock")                                                  │
//! │  Product │ Price │ QTY IN HAND │ REORDER                                │
//! │                                                                         │
//! │  Transactions ("new day to day")                                        │
//! │  DATE │ SALES │ PURCHASED │ SERVICE │ NAME │ PHONE │ AMOUNT │           │
//! │  PAYMENT MODE │ NOTES                                                   │
//! │                                                                         │
//! │  Enquiries ("Enquiry")                                                  │
//! │  DATE │ CUSTOMERS NAME │ PH NO │ PRODUCT DETAIL │ CONTENT               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Column ordinals are 0-based positions in the descriptor, which is also the
//! order values are appended in.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Collection
// =============================================================================

/// The three independent record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Stock,
    Transactions,
    Enquiries,
}

impl Collection {
    /// All collections, in dashboard tab order.
    pub const ALL: [Collection; 3] = [
        Collection::Stock,
        Collection::Transactions,
        Collection::Enquiries,
    ];

    /// Returns the column descriptor for this collection.
    pub fn schema(&self) -> &'static Schema {
        match self {
            Collection::Stock => &STOCK_SCHEMA,
            Collection::Transactions => &TRANSACTION_SCHEMA,
            Collection::Enquiries => &ENQUIRY_SCHEMA,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Stock => write!(f, "stock"),
            Collection::Transactions => write!(f, "transactions"),
            Collection::Enquiries => write!(f, "enquiries"),
        }
    }
}

// =============================================================================
// Field Descriptors
// =============================================================================

/// How a column is interpreted by numeric consumers.
///
/// Every column is kept as text for filtering; the kind only decides what
/// the mapper and the aggregations coerce it into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Calendar date stored as free text.
    Date,
    /// Lenient decimal (prices, amounts).
    Decimal,
    /// Lenient whole number (quantities).
    Integer,
}

impl FieldKind {
    /// Returns true if the column feeds numeric aggregation.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Decimal | FieldKind::Integer)
    }
}

/// A single column of a worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Header text, matched case-sensitively.
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Ordered column list for one collection.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub collection: Collection,
    pub fields: &'static [FieldDef],
}

impl Schema {
    /// Header row, in append order.
    pub fn header(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// 0-based ordinal of a column, if the schema has it.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Looks up a column descriptor by header text.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of columns an appended row must carry.
    pub fn width(&self) -> usize {
        self.fields.len()
    }
}

const fn text(name: &'static str) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Text,
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Column names of the stock worksheet.
pub mod stock {
    pub const PRODUCT: &str = "Product";
    pub const PRICE: &str = "Price";
    pub const QTY_IN_HAND: &str = "QTY IN HAND";
    pub const REORDER: &str = "REORDER";

    /// Column written by sell/purchase.
    pub const QTY_IN_HAND_ORDINAL: usize = 2;
}

pub static STOCK_SCHEMA: Schema = Schema {
    collection: Collection::Stock,
    fields: &[
        text(stock::PRODUCT),
        FieldDef {
            name: stock::PRICE,
            kind: FieldKind::Decimal,
        },
        FieldDef {
            name: stock::QTY_IN_HAND,
            kind: FieldKind::Integer,
        },
        text(stock::REORDER),
    ],
};

// =============================================================================
// Transactions
// =============================================================================

/// Column names of the day-to-day worksheet.
pub mod transactions {
    pub const DATE: &str = "DATE";
    pub const SALES: &str = "SALES";
    pub const PURCHASED: &str = "PURCHASED";
    pub const SERVICE: &str = "SERVICE";
    pub const NAME: &str = "NAME";
    pub const PHONE: &str = "PHONE";
    pub const AMOUNT: &str = "AMOUNT";
    pub const PAYMENT_MODE: &str = "PAYMENT MODE";
    pub const NOTES: &str = "NOTES";
}

pub static TRANSACTION_SCHEMA: Schema = Schema {
    collection: Collection::Transactions,
    fields: &[
        FieldDef {
            name: transactions::DATE,
            kind: FieldKind::Date,
        },
        text(transactions::SALES),
        text(transactions::PURCHASED),
        text(transactions::SERVICE),
        text(transactions::NAME),
        text(transactions::PHONE),
        FieldDef {
            name: transactions::AMOUNT,
            kind: FieldKind::Decimal,
        },
        text(transactions::PAYMENT_MODE),
        text(transactions::NOTES),
    ],
};

// =============================================================================
// Enquiries
// =============================================================================

/// Column names of the enquiry worksheet.
pub mod enquiries {
    pub const DATE: &str = "DATE";
    pub const CUSTOMER_NAME: &str = "CUSTOMERS NAME";
    pub const PHONE: &str = "PH NO";
    pub const PRODUCT_DETAIL: &str = "PRODUCT DETAIL";
    pub const CONTENT: &str = "CONTENT";
}

pub static ENQUIRY_SCHEMA: Schema = Schema {
    collection: Collection::Enquiries,
    fields: &[
        FieldDef {
            name: enquiries::DATE,
            kind: FieldKind::Date,
        },
        text(enquiries::CUSTOMER_NAME),
        text(enquiries::PHONE),
        text(enquiries::PRODUCT_DETAIL),
        text(enquiries::CONTENT),
    ],
};

// =============================================================================
// Unit Tests
// =============================================================================
