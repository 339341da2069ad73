//! # Filter Engine
//!
//! Case-insensitive, multi-column substring filtering over a snapshot.
//!
//! ## Matching Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Predicates { "NAME": "ra", "AMOUNT": "50" }                            │
//! │                                                                         │
//! │  record passes iff, for EVERY non-empty pattern:                        │
//! │      lowercase(field text) contains lowercase(pattern)                  │
//! │                                                                         │
//! │  "50" matches 500, 1500 and "50.00"  (numbers are matched as text)      │
//! │  ""   matches everything              (empty pattern = no constraint)   │
//! │  unknown column                       → never matches                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::schema::{enquiries, stock, transactions};
use crate::types::Record;

// =============================================================================
// Predicates
// =============================================================================

/// Column name → substring pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Predicates(BTreeMap<String, String>);

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the pattern for a column.
    pub fn with(mut self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.0.insert(column.into(), pattern.into());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, pattern: impl Into<String>) {
        self.0.insert(column.into(), pattern.into());
    }

    /// Patterns that actually constrain, i.e. the non-empty ones.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, pattern)| !pattern.is_empty())
            .map(|(column, pattern)| (column.as_str(), pattern.as_str()))
    }

    /// Returns true if no pattern would reject anything.
    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }

    /// Tests a single record.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.active().all(|(column, pattern)| {
            match record.field_text(column) {
                Some(text) => text.to_lowercase().contains(&pattern.to_lowercase()),
                None => false,
            }
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Predicates {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Predicates(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Returns the records that satisfy every non-empty predicate, in input order.
pub fn filter<R: Record + Clone>(records: &[R], predicates: &Predicates) -> Vec<R> {
    if predicates.is_unconstrained() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| predicates.matches(*record))
        .cloned()
        .collect()
}

// =============================================================================
// Filter Forms
// =============================================================================

/// Stock tab search box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct StockFilter {
    pub product: String,
}

impl From<&StockFilter> for Predicates {
    fn from(form: &StockFilter) -> Self {
        Predicates::new().with(stock::PRODUCT, form.product.as_str())
    }
}

/// Transactions tab filter row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionFilter {
    pub date: String,
    pub sales: String,
    pub purchased: String,
    pub service: String,
    pub name: String,
    pub phone: String,
    pub amount: String,
    pub payment_mode: String,
}

impl From<&TransactionFilter> for Predicates {
    fn from(form: &TransactionFilter) -> Self {
        [
            (transactions::DATE, &form.date),
            (transactions::SALES, &form.sales),
            (transactions::PURCHASED, &form.purchased),
            (transactions::SERVICE, &form.service),
            (transactions::NAME, &form.name),
            (transactions::PHONE, &form.phone),
            (transactions::AMOUNT, &form.amount),
            (transactions::PAYMENT_MODE, &form.payment_mode),
        ]
        .into_iter()
        .map(|(column, pattern)| (column, pattern.as_str()))
        .collect()
    }
}

/// Enquiry tab filter row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct EnquiryFilter {
    pub date: String,
    pub customer_name: String,
    pub phone: String,
    pub product_detail: String,
    pub content: String,
}

impl From<&EnquiryFilter> for Predicates {
    fn from(form: &EnquiryFilter) -> Self {
        [
            (enquiries::DATE, &form.date),
            (enquiries::CUSTOMER_NAME, &form.customer_name),
            (enquiries::PHONE, &form.phone),
            (enquiries::PRODUCT_DETAIL, &form.product_detail),
            (enquiries::CONTENT, &form.content),
        ]
        .into_iter()
        .map(|(column, pattern)| (column, pattern.as_str()))
        .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NumericText, Product, RowIndex, Transaction};

    fn entry(index: usize, name: &str, amount: &str, mode: &str) -> Transaction {
        Transaction {
            row_index: RowIndex(index),
            date: "2024-01-05".to_string(),
            sales_item: "Uno".to_string(),
            purchased_item: String::new(),
            service_item: String::new(),
            customer_name: name.to_string(),
            phone: String::new(),
            amount: NumericText::new(amount),
            payment_mode: mode.to_string(),
            notes: String::new(),
        }
    }

    fn ledger() -> Vec<Transaction> {
        vec![
            entry(0, "Ravi", "500", "Cash"),
            entry(1, "Asha", "1500", "UPI"),
            entry(2, "RAVINDRA", "50.00", "cash"),
            entry(3, "Meena", "20", "Card"),
        ]
    }

    fn names(records: &[Transaction]) -> Vec<&str> {
        records.iter().map(|r| r.customer_name.as_str()).collect()
    }

    #[test]
    fn test_empty_predicates_are_identity() {
        let records = ledger();
        assert_eq!(filter(&records, &Predicates::new()), records);

        let blank = Predicates::new().with("NAME", "").with("AMOUNT", "");
        assert!(blank.is_unconstrained());
        assert_eq!(filter(&records, &blank), records);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let records = ledger();
        let hits = filter(&records, &Predicates::new().with("NAME", "rav"));
        assert_eq!(names(&hits), vec!["Ravi", "RAVINDRA"]);
    }

    #[test]
    fn test_numeric_text_substring() {
        let records = ledger();
        let hits = filter(&records, &Predicates::new().with("AMOUNT", "50"));
        assert_eq!(names(&hits), vec!["Ravi", "Asha", "RAVINDRA"]);
    }

    #[test]
    fn test_all_predicates_must_hold() {
        let records = ledger();
        let predicates = Predicates::new().with("NAME", "rav").with("PAYMENT MODE", "CASH");
        let hits = filter(&records, &predicates);
        assert_eq!(names(&hits), vec!["Ravi", "RAVINDRA"]);

        let narrower = predicates.with("AMOUNT", ".00");
        assert_eq!(names(&filter(&records, &narrower)), vec!["RAVINDRA"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = ledger();
        let predicates = Predicates::new().with("PAYMENT MODE", "a");
        let once = filter(&records, &predicates);
        let twice = filter(&once, &predicates);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_column_never_matches() {
        let records = ledger();
        let hits = filter(&records, &Predicates::new().with("GSTIN", "x"));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_integer_column_matches_as_text() {
        let products = vec![Product {
            row_index: RowIndex(0),
            name: "Chess".to_string(),
            price: NumericText::new("10"),
            quantity_in_hand: 12,
            reorder: String::new(),
        }];
        let hits = filter(&products, &Predicates::new().with("QTY IN HAND", "1"));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_forms_convert_to_predicates() {
        let form = TransactionFilter {
            name: "asha".to_string(),
            payment_mode: "upi".to_string(),
            ..Default::default()
        };
        let predicates = Predicates::from(&form);
        let active: Vec<(&str, &str)> = predicates.active().collect();
        assert_eq!(active, vec![("NAME", "asha"), ("PAYMENT MODE", "upi")]);
        assert_eq!(names(&filter(&ledger(), &predicates)), vec!["Asha"]);

        assert!(Predicates::from(&StockFilter::default()).is_unconstrained());
        assert!(Predicates::from(&EnquiryFilter::default()).is_unconstrained());
    }

    #[test]
    fn test_form_deserializes_partial_json() {
        let form: EnquiryFilter =
            serde_json::from_str(r#"{"productDetail":"ps5"}"#).unwrap();
        assert_eq!(form.product_detail, "ps5");
        assert!(form.customer_name.is_empty());
    }
}
