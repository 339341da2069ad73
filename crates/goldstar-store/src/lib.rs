//! # goldstar-store: Workbook Access for the Gold Star Dashboard
//!
//! This crate owns every call to the workbook. It reads worksheets through a
//! [`RecordStore`], hands the rows to `goldstar-core`, and writes back the
//! single cell or row that a mutation produces.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Gold Star Data Flow                              │
//! │                                                                         │
//! │  UI form ("Reduce by 1", "Add Entry", filter boxes)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  goldstar-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │  Dashboard    │    │ Repositories  │    │   Backends   │   │   │
//! │  │   │ (facade)      │───►│ Stock         │───►│ MemoryStore  │   │   │
//! │  │   │ config, errors│    │ Transaction   │    │ CsvStore     │   │   │
//! │  │   │               │    │ Enquiry       │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   Workbook: Games Stock │ new day to day │ Enquiry              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - The `RecordStore` trait and its backends
//! - [`repository`] - Per-worksheet repositories
//! - [`dashboard`] - The presentation-facing facade
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Store, dashboard and API error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use goldstar_store::{Dashboard, DashboardConfig};
//!
//! let config = DashboardConfig::load(None)?;
//! let dashboard = Dashboard::open(config).await?;
//!
//! dashboard.purchase_one("Chess").await?;
//! let summary = dashboard.stock_summary().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{CsvStore, MemoryStore, RecordStore};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{ApiError, DashboardError, ErrorCode, StoreError};

pub use repository::{EnquiryRepository, StockRepository, TransactionRepository};
