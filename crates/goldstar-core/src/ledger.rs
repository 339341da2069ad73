//! # Inventory Ledger
//!
//! Stock lookups, sell/purchase planning, low-stock classification and
//! stock valuation over a loaded snapshot.
//!
//! ## Plan, Then Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sell (Reduce by 1)                               │
//! │                                                                         │
//! │  StockRepository::sell_one("Chess")        (goldstar-store)             │
//! │       │                                                                 │
//! │       │ 1. load_all(Stock)  ── one snapshot read                        │
//! │       ▼                                                                 │
//! │  plan_sell(&snapshot, "Chess")             (THIS MODULE, pure)          │
//! │       │                                                                 │
//! │       ├── not found?   → CoreError::ProductNotFound                     │
//! │       ├── qty <= 0?    → CoreError::InsufficientStock (no write)        │
//! │       └── OK           → StockMutation { row, QTY IN HAND, qty - 1 }    │
//! │       │                                                                 │
//! │       │ 2. update_field(Stock, row, ordinal, "qty - 1") ── one write    │
//! │       ▼                                                                 │
//! │  New quantity returned to the caller                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The snapshot is never re-read between plan and write, so a concurrent
//! writer to the same cell wins or loses on last-writer-wins terms.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::schema::{stock, Collection};
use crate::types::{NewProduct, NewRecord, Product, RowIndex};
use crate::validation::validate_new_product;

// =============================================================================
// Stock Mutation
// =============================================================================

/// A single-cell quantity write computed from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockMutation {
    pub product: String,
    pub row_index: RowIndex,
    /// 0-based column ordinal of `QTY IN HAND`.
    pub field_ordinal: usize,
    pub previous_quantity: i64,
    pub new_quantity: i64,
}

impl StockMutation {
    fn new(product: &Product, new_quantity: i64) -> Self {
        StockMutation {
            product: product.name.clone(),
            row_index: product.row_index,
            field_ordinal: stock::QTY_IN_HAND_ORDINAL,
            previous_quantity: product.quantity_in_hand,
            new_quantity,
        }
    }

    /// Cell text to write.
    pub fn value(&self) -> String {
        self.new_quantity.to_string()
    }

    pub fn collection(&self) -> Collection {
        Collection::Stock
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Finds a product by exact name.
///
/// Names are not unique in the worksheet; the first row in snapshot order
/// wins.
pub fn find_product<'a>(snapshot: &'a [Product], name: &str) -> Option<&'a Product> {
    snapshot.iter().find(|p| p.name == name)
}

fn require_product<'a>(snapshot: &'a [Product], name: &str) -> CoreResult<&'a Product> {
    find_product(snapshot, name).ok_or_else(|| CoreError::ProductNotFound(name.to_string()))
}

// =============================================================================
// Mutation Planning
// =============================================================================

/// Plans selling one unit.
///
/// ## Errors
/// * `ProductNotFound` - no row with that name
/// * `InsufficientStock` - quantity is already 0 (or below)
pub fn plan_sell(snapshot: &[Product], name: &str) -> CoreResult<StockMutation> {
    let product = require_product(snapshot, name)?;

    if !product.can_sell() {
        return Err(CoreError::InsufficientStock {
            product: product.name.clone(),
            available: product.quantity_in_hand,
        });
    }

    Ok(StockMutation::new(product, product.quantity_in_hand - 1))
}

/// Plans purchasing one unit. Always succeeds for an existing product.
pub fn plan_purchase(snapshot: &[Product], name: &str) -> CoreResult<StockMutation> {
    let product = require_product(snapshot, name)?;
    Ok(StockMutation::new(
        product,
        product.quantity_in_hand.saturating_add(1),
    ))
}

/// Validates a new product and returns the row to append.
///
/// Duplicate names are accepted; the existing first row keeps winning
/// lookups.
pub fn plan_add_item(product: &NewProduct) -> CoreResult<Vec<String>> {
    validate_new_product(product)?;
    Ok(product.to_row())
}

// =============================================================================
// Classification & Valuation
// =============================================================================

/// Products with `quantity_in_hand <= threshold`, in snapshot order.
pub fn classify_low_stock(snapshot: &[Product], threshold: i64) -> Vec<&Product> {
    snapshot
        .iter()
        .filter(|p| p.quantity_in_hand <= threshold)
        .collect()
}

/// Σ price × quantity. Malformed prices contribute nothing.
pub fn compute_stock_value(snapshot: &[Product]) -> Money {
    snapshot.iter().map(Product::stock_value).sum()
}

/// Total units on hand across all rows.
pub fn total_quantity(snapshot: &[Product]) -> i64 {
    snapshot
        .iter()
        .fold(0i64, |acc, p| acc.saturating_add(p.quantity_in_hand))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericText;
    use crate::ValidationError;

    fn product(index: usize, name: &str, price: &str, qty: i64) -> Product {
        Product {
            row_index: RowIndex(index),
            name: name.to_string(),
            price: NumericText::new(price),
            quantity_in_hand: qty,
            reorder: String::new(),
        }
    }

    fn apply(snapshot: &mut [Product], mutation: &StockMutation) {
        snapshot[mutation.row_index.get()].quantity_in_hand = mutation.new_quantity;
    }

    fn catalogue() -> Vec<Product> {
        vec![
            product(0, "Chess", "10", 1),
            product(1, "Ludo", "5", 0),
            product(2, "Carrom", "1200", 4),
            product(3, "Uno", "3", 2),
        ]
    }

    #[test]
    fn test_find_product_first_match_wins() {
        let mut snapshot = catalogue();
        snapshot.push(product(4, "Chess", "99", 50));

        let found = find_product(&snapshot, "Chess").unwrap();
        assert_eq!(found.row_index, RowIndex(0));
        assert!(find_product(&snapshot, "chess").is_none());
    }

    #[test]
    fn test_sell_decrements_by_one() {
        let snapshot = catalogue();
        let mutation = plan_sell(&snapshot, "Carrom").unwrap();

        assert_eq!(mutation.row_index, RowIndex(2));
        assert_eq!(mutation.field_ordinal, 2);
        assert_eq!(mutation.previous_quantity, 4);
        assert_eq!(mutation.new_quantity, 3);
        assert_eq!(mutation.value(), "3");
    }

    #[test]
    fn test_sell_at_zero_is_rejected() {
        let snapshot = catalogue();
        assert_eq!(
            plan_sell(&snapshot, "Ludo"),
            Err(CoreError::InsufficientStock {
                product: "Ludo".to_string(),
                available: 0
            })
        );
    }

    #[test]
    fn test_unknown_product() {
        let snapshot = catalogue();
        assert!(matches!(
            plan_sell(&snapshot, "Jenga"),
            Err(CoreError::ProductNotFound(_))
        ));
        assert!(matches!(
            plan_purchase(&snapshot, "Jenga"),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_sell_then_purchase_round_trips() {
        for start in 1..=5 {
            let mut snapshot = vec![product(0, "Chess", "10", start)];

            let sell = plan_sell(&snapshot, "Chess").unwrap();
            apply(&mut snapshot, &sell);
            let purchase = plan_purchase(&snapshot, "Chess").unwrap();
            apply(&mut snapshot, &purchase);

            assert_eq!(snapshot[0].quantity_in_hand, start);
        }
    }

    #[test]
    fn test_chess_scenario() {
        let mut snapshot = vec![product(0, "Chess", "10", 1)];

        let low: Vec<&str> = classify_low_stock(&snapshot, 1)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(low, vec!["Chess"]);

        let sell = plan_sell(&snapshot, "Chess").unwrap();
        apply(&mut snapshot, &sell);
        assert_eq!(snapshot[0].quantity_in_hand, 0);

        assert!(matches!(
            plan_sell(&snapshot, "Chess"),
            Err(CoreError::InsufficientStock { .. })
        ));
        assert_eq!(snapshot[0].quantity_in_hand, 0);
    }

    #[test]
    fn test_classify_low_stock_is_exact_and_monotonic() {
        let snapshot = catalogue();
        let mut previous = 0;

        for threshold in -1..=5 {
            let low = classify_low_stock(&snapshot, threshold);
            assert!(low.iter().all(|p| p.quantity_in_hand <= threshold));
            let expected = snapshot
                .iter()
                .filter(|p| p.quantity_in_hand <= threshold)
                .count();
            assert_eq!(low.len(), expected);
            assert!(low.len() >= previous);
            previous = low.len();
        }
    }

    #[test]
    fn test_classify_low_stock_preserves_order() {
        let snapshot = catalogue();
        let names: Vec<&str> = classify_low_stock(&snapshot, 2)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Chess", "Ludo", "Uno"]);
    }

    #[test]
    fn test_stock_value_skips_bad_price() {
        let snapshot = vec![product(0, "A", "10", 2), product(1, "B", "bad", 3)];
        assert_eq!(compute_stock_value(&snapshot), Money::from_cents(2000));
    }

    #[test]
    fn test_total_quantity() {
        assert_eq!(total_quantity(&catalogue()), 7);
        assert_eq!(total_quantity(&[]), 0);
    }

    #[test]
    fn test_plan_add_item() {
        let ok = NewProduct {
            name: "Jenga".to_string(),
            price: Money::from_cents(79900),
            quantity: 2,
            reorder: "No".to_string(),
        };
        assert_eq!(plan_add_item(&ok).unwrap(), vec!["Jenga", "799.00", "2", "No"]);

        let blank = NewProduct {
            name: "   ".to_string(),
            ..ok
        };
        assert_eq!(
            plan_add_item(&blank),
            Err(CoreError::Validation(ValidationError::Required {
                field: "Product".to_string()
            }))
        );
    }
}
