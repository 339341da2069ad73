//! # Error Types
//!
//! Domain-specific error types for goldstar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  goldstar-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  goldstar-store errors (separate crate)                                │
//! │  ├── StoreError       - Workbook I/O failures                          │
//! │  └── DashboardError   - What the facade returns                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DashboardError → ApiError         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed cell data is deliberately absent from this hierarchy: it is
//! absorbed by [`crate::coerce`] and never becomes an error.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// No product row carries this exact name.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Selling would take the quantity below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Sell (Reduce by 1) on "Chess"
    ///      │
    ///      ▼
    /// Check stock: available=0
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Chess", available: 0 }
    ///      │
    ///      ▼
    /// UI shows: "Cannot sell, stock is already 0!"
    /// ```
    #[error("Insufficient stock for {product}: available {available}")]
    InsufficientStock { product: String, available: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for new entries.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or whitespace only.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field was given a negative value.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
