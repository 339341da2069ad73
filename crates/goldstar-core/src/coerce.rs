//! # Lenient Numeric Coercion
//!
//! The single place where worksheet text becomes a number.
//!
//! ## Degrade, Never Abort
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cell text        to_decimal     to_integer     to_money                │
//! │  ─────────        ──────────     ──────────     ────────                │
//! │  "50"             50.0           50             50.00                   │
//! │  " 12.5 "         12.5           12             12.50                   │
//! │  "abc"            0.0            0              0.00                    │
//! │  ""               0.0            0              0.00                    │
//! │  "NaN" / "inf"    0.0            0              0.00                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock valuation, transaction totals and top-N sums all go through these
//! functions so one bad historical row is treated identically everywhere.

use crate::money::Money;

/// Parses a decimal, returning `None` for anything that is not a finite number.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decimal value of a cell, 0.0 when malformed.
pub fn to_decimal(text: &str) -> f64 {
    parse_decimal(text).unwrap_or(0.0)
}

/// Whole-number value of a cell, 0 when malformed.
///
/// Integral text parses exactly; decimal text is truncated toward zero
/// (`"3.0"` → 3, `"2.7"` → 2).
pub fn to_integer(text: &str) -> i64 {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    match parse_decimal(trimmed) {
        Some(value) if value.abs() < i64::MAX as f64 => value.trunc() as i64,
        _ => 0,
    }
}

/// Money value of a cell, zero when malformed.
pub fn to_money(text: &str) -> Money {
    Money::from_decimal(to_decimal(text))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal() {
        assert_eq!(to_decimal("50"), 50.0);
        assert_eq!(to_decimal(" 12.5 "), 12.5);
        assert_eq!(to_decimal("-3"), -3.0);
        assert_eq!(to_decimal("abc"), 0.0);
        assert_eq!(to_decimal(""), 0.0);
    }

    #[test]
    fn test_non_finite_degrades_to_zero() {
        assert_eq!(to_decimal("NaN"), 0.0);
        assert_eq!(to_decimal("inf"), 0.0);
        assert_eq!(to_integer("-infinity"), 0);
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(to_integer("7"), 7);
        assert_eq!(to_integer("3.0"), 3);
        assert_eq!(to_integer("2.7"), 2);
        assert_eq!(to_integer("-1"), -1);
        assert_eq!(to_integer("many"), 0);
        assert_eq!(to_integer("1e30"), 0);
    }

    #[test]
    fn test_to_money() {
        assert_eq!(to_money("10.99").cents(), 1099);
        assert_eq!(to_money("bad").cents(), 0);
    }
}
