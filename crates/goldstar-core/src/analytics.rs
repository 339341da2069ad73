//! # Aggregation Engine
//!
//! Totals, distinct counts and top-N rankings over a loaded snapshot, plus the
//! three dashboard summaries built from them.
//!
//! ## Top-N
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rows:  X:3   Y:5   Z:5   X:0                                           │
//! │                                                                         │
//! │  1. group by key, first-seen order   →  [X:3, Y:5, Z:5]                 │
//! │  2. stable sort, value descending    →  [Y:5, Z:5, X:3]                 │
//! │  3. truncate to n = 2                →  [Y:5, Z:5]                      │
//! │                                                                         │
//! │  A blank cell is a key like any other: "" forms its own group.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is total: malformed numbers count as 0, empty input
//! gives zero or an empty ranking.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use ts_rs::TS;

use crate::coerce;
use crate::ledger::{classify_low_stock, compute_stock_value, total_quantity};
use crate::money::Money;
use crate::schema::{enquiries, transactions};
use crate::types::{Enquiry, Product, Record, Transaction};

// =============================================================================
// Primitives
// =============================================================================

/// How grouped records are reduced to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate<'a> {
    /// Number of records in the group.
    Count,
    /// Sum of a numeric column, malformed cells counting as 0.
    Sum(&'a str),
}

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedEntry {
    pub key: String,
    pub value: f64,
}

/// Record count and the sum of a numeric column.
pub fn total_and_count<R: Record>(records: &[R], field: &str) -> (usize, f64) {
    let sum: f64 = records
        .iter()
        .map(|r| numeric(r, field))
        .sum();
    (records.len(), sum)
}

/// Number of distinct values in a column, the blank value included.
///
/// Records of a type without the column contribute nothing.
pub fn distinct_count<R: Record>(records: &[R], field: &str) -> usize {
    records
        .iter()
        .filter_map(|r| group_key(r, field))
        .collect::<HashSet<_>>()
        .len()
}

/// Groups, aggregates, ranks descending and keeps the first `n`.
///
/// Ties keep the order in which their groups were first seen.
pub fn top_n<R: Record>(
    records: &[R],
    group_by: &str,
    aggregate: Aggregate<'_>,
    n: usize,
) -> Vec<RankedEntry> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<RankedEntry> = Vec::new();

    for record in records {
        let Some(key) = group_key(record, group_by) else {
            continue;
        };
        let contribution = match aggregate {
            Aggregate::Count => 1.0,
            Aggregate::Sum(field) => numeric(record, field),
        };

        match positions.get(&key) {
            Some(&at) => groups[at].value += contribution,
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(RankedEntry {
                    key,
                    value: contribution,
                });
            }
        }
    }

    groups.sort_by(|a, b| b.value.total_cmp(&a.value));
    groups.truncate(n);
    groups
}

/// Most frequent values of a column.
pub fn value_counts<R: Record>(records: &[R], field: &str, n: usize) -> Vec<RankedEntry> {
    top_n(records, field, Aggregate::Count, n)
}

fn numeric<R: Record>(record: &R, field: &str) -> f64 {
    record
        .field_text(field)
        .map(|text| coerce::to_decimal(&text))
        .unwrap_or(0.0)
}

/// Grouping key: the literal cell text, or `None` when the record type has
/// no such column.
fn group_key<R: Record>(record: &R, field: &str) -> Option<String> {
    record.field_text(field).map(|text| text.into_owned())
}

// =============================================================================
// Summary Limits
// =============================================================================

/// Threshold and ranking sizes used by the summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLimits {
    pub low_stock_threshold: i64,
    pub top_customers: usize,
    pub top_sold_products: usize,
    pub top_enquiry_products: usize,
    pub top_enquiry_customers: usize,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        SummaryLimits {
            low_stock_threshold: crate::DEFAULT_LOW_STOCK_THRESHOLD,
            top_customers: crate::DEFAULT_TOP_CUSTOMERS,
            top_sold_products: crate::DEFAULT_TOP_SOLD_PRODUCTS,
            top_enquiry_products: crate::DEFAULT_TOP_ENQUIRY_PRODUCTS,
            top_enquiry_customers: crate::DEFAULT_TOP_ENQUIRY_CUSTOMERS,
        }
    }
}

// =============================================================================
// Stock Summary
// =============================================================================

/// Quantity line for the stock chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuantity {
    pub product: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total_products: usize,
    pub total_quantity: i64,
    pub low_stock_threshold: i64,
    pub low_stock_count: usize,
    pub low_stock_products: Vec<String>,
    pub total_stock_value: Money,
    pub quantities: Vec<ProductQuantity>,
}

impl StockSummary {
    pub fn build(products: &[Product], limits: &SummaryLimits) -> Self {
        let low: Vec<String> = classify_low_stock(products, limits.low_stock_threshold)
            .into_iter()
            .map(|p| p.name.clone())
            .collect();

        StockSummary {
            total_products: products.len(),
            total_quantity: total_quantity(products),
            low_stock_threshold: limits.low_stock_threshold,
            low_stock_count: low.len(),
            low_stock_products: low,
            total_stock_value: compute_stock_value(products),
            quantities: products
                .iter()
                .map(|p| ProductQuantity {
                    product: p.name.clone(),
                    quantity: p.quantity_in_hand,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Transaction Summary
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub entry_count: usize,
    pub total_amount: Money,
    pub distinct_customers: usize,
    /// Customers ranked by summed amount.
    pub top_customers: Vec<RankedEntry>,
    /// Sold items ranked by number of entries.
    pub top_sold_products: Vec<RankedEntry>,
}

impl TransactionSummary {
    pub fn build(entries: &[Transaction], limits: &SummaryLimits) -> Self {
        TransactionSummary {
            entry_count: entries.len(),
            total_amount: entries.iter().map(|t| t.amount.as_money()).sum(),
            distinct_customers: distinct_count(entries, transactions::NAME),
            top_customers: top_n(
                entries,
                transactions::NAME,
                Aggregate::Sum(transactions::AMOUNT),
                limits.top_customers,
            ),
            top_sold_products: value_counts(
                entries,
                transactions::SALES,
                limits.top_sold_products,
            ),
        }
    }
}

// =============================================================================
// Enquiry Summary
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EnquirySummary {
    pub total_enquiries: usize,
    pub top_products: Vec<RankedEntry>,
    pub top_customers: Vec<RankedEntry>,
}

impl EnquirySummary {
    pub fn build(records: &[Enquiry], limits: &SummaryLimits) -> Self {
        EnquirySummary {
            total_enquiries: records.len(),
            top_products: value_counts(
                records,
                enquiries::PRODUCT_DETAIL,
                limits.top_enquiry_products,
            ),
            top_customers: value_counts(
                records,
                enquiries::CUSTOMER_NAME,
                limits.top_enquiry_customers,
            ),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
