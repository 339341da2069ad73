//! # Validation Module
//!
//! Input checks applied before a new row is appended.
//!
//! ## What Is (and Is Not) Validated
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Add Item form                                                          │
//! │  ├── Product name: must not be empty or whitespace   ← checked          │
//! │  ├── Price:        must not be negative              ← checked          │
//! │  ├── Quantity:     must not be negative              ← checked          │
//! │  └── Duplicate product name                          ← NOT checked      │
//! │                                                                         │
//! │  Existing worksheet rows are never validated: dirty data is absorbed   │
//! │  by coercion when it is read.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::schema::stock;
use crate::types::NewProduct;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name.
///
/// ```rust
/// use goldstar_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Chess").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: stock::PRODUCT.to_string(),
        });
    }
    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.cents() < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: stock::PRICE.to_string(),
        });
    }
    Ok(())
}

/// Validates an opening quantity. Zero is allowed.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: stock::QTY_IN_HAND.to_string(),
        });
    }
    Ok(())
}

/// Runs every check for the "Add Item" form, name first.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    validate_quantity(product.quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
