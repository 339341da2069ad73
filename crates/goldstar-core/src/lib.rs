//! # goldstar-core: Pure Ledger & Analytics for the Gold Star Dashboard
//!
//! This crate is the **heart** of the dashboard. It turns raw worksheet rows
//! into typed records and runs every rule over them as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Gold Star Dashboard Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Presentation (forms, charts, exports) - external        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            goldstar-store: Dashboard facade + repositories      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw rows / mutation plans              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ goldstar-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  schema  │  │  mapper  │  │  ledger  │  │   filter     │   │   │
//! │  │   │ columns  │─►│ RawRow → │─►│ sell/buy │  │   analytics  │   │   │
//! │  │   │ per tab  │  │ records  │  │ low stock│  │   top-N      │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`schema`] - Per-collection column descriptors
//! - [`types`] - Products, transactions, enquiries and their row identity
//! - [`coerce`] - The one lenient text → number conversion
//! - [`mapper`] - Raw rows into typed records
//! - [`ledger`] - Stock lookups, mutation plans, low-stock, valuation
//! - [`filter`] - Case-insensitive multi-column substring filtering
//! - [`analytics`] - Totals, distinct counts, top-N rankings, summaries
//! - [`money`] - Integer minor-unit money
//! - [`validation`] - Input checks for new entries
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same snapshot in, same answer out
//! 2. **Degrade, never abort**: a dirty historical cell becomes 0 or "",
//!    it never hides the rest of the data
//! 3. **Explicit Errors**: business-rule violations are typed, never strings
//!
//! ## Example Usage
//!
//! ```rust
//! use goldstar_core::ledger::{classify_low_stock, compute_stock_value};
//! use goldstar_core::mapper::map_rows;
//! use goldstar_core::schema::stock;
//! use goldstar_core::types::{Product, RawRow};
//!
//! let rows: Vec<RawRow> = vec![
//!     [(stock::PRODUCT, "Chess"), (stock::PRICE, "10"), (stock::QTY_IN_HAND, "1")]
//!         .into_iter()
//!         .map(|(k, v)| (k.to_string(), v.to_string()))
//!         .collect(),
//! ];
//! let products: Vec<Product> = map_rows(&rows);
//!
//! assert_eq!(classify_low_stock(&products, 1).len(), 1);
//! assert_eq!(compute_stock_value(&products).cents(), 1000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod coerce;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod mapper;
pub mod money;
pub mod schema;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::Predicates;
pub use money::Money;
pub use schema::Collection;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity at or below which a product shows up in the low-stock alert.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 1;

/// Number of customers ranked by total transaction amount.
pub const DEFAULT_TOP_CUSTOMERS: usize = 5;

/// Number of sold products ranked by occurrence.
pub const DEFAULT_TOP_SOLD_PRODUCTS: usize = 10;

/// Number of products ranked by enquiry count.
pub const DEFAULT_TOP_ENQUIRY_PRODUCTS: usize = 5;

/// Number of customers ranked by enquiry count.
pub const DEFAULT_TOP_ENQUIRY_CUSTOMERS: usize = 5;
