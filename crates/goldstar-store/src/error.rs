//! # Store & Dashboard Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / csv::Error                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (backend boundary)      CoreError (business rules)          │
//! │       │                                  │                              │
//! │       └──────────────┬───────────────────┘                              │
//! │                      ▼                                                  │
//! │  DashboardError (every Dashboard operation)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError { code, message } ← serialized for the UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Boundary errors are never retried or swallowed here; they reach the
//! caller unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use goldstar_core::{Collection, CoreError, RowIndex};

// =============================================================================
// Store Errors
// =============================================================================

/// Errors raised by a [`RecordStore`](crate::backend::RecordStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing workbook could not be reached.
    ///
    /// ## When This Occurs
    /// - Workbook directory or worksheet file missing or unreadable
    /// - Disk full, permissions
    /// - In-memory store switched offline
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// A row or column does not fit the worksheet's header.
    ///
    /// ## When This Occurs
    /// - Appending a row with the wrong number of values
    /// - Updating a column ordinal outside the header
    /// - A worksheet file whose header differs from the schema
    #[error("Schema mismatch in {collection}: {reason}")]
    SchemaMismatch {
        collection: Collection,
        reason: String,
    },

    /// An update addressed a row beyond the end of the worksheet.
    #[error("Row {row} not found in {collection}")]
    RowNotFound {
        collection: Collection,
        row: RowIndex,
    },
}

impl StoreError {
    pub fn schema_mismatch(collection: Collection, reason: impl Into<String>) -> Self {
        StoreError::SchemaMismatch {
            collection,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Dashboard Errors
// =============================================================================

/// Errors returned by [`Dashboard`](crate::Dashboard) operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A business rule rejected the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed.
    #[error("Failed to load configuration: {0}")]
    ConfigLoadFailed(String),

    /// Configuration file could not be written.
    #[error("Failed to save configuration: {0}")]
    ConfigSaveFailed(String),
}

/// Result type for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

// =============================================================================
// API Error
// =============================================================================

/// Serializable error for a UI.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for Chess: available 0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Sell requested with nothing on hand
    InsufficientStock,

    /// Product or row not found
    NotFound,

    /// Workbook unreachable
    StoreUnavailable,

    /// Row shape does not match the worksheet
    SchemaMismatch,

    /// Configuration could not be loaded or is invalid
    ConfigError,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(name) => ApiError::not_found("Product", &name),
            err @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(e) => {
                tracing::error!("Record store unavailable: {}", e);
                ApiError::new(ErrorCode::StoreUnavailable, "Workbook is unavailable")
            }
            err @ StoreError::SchemaMismatch { .. } => {
                ApiError::new(ErrorCode::SchemaMismatch, err.to_string())
            }
            StoreError::RowNotFound { collection, row } => {
                ApiError::not_found(&format!("Row in {}", collection), &row.to_string())
            }
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Core(e) => e.into(),
            DashboardError::Store(e) => e.into(),
            err @ (DashboardError::InvalidConfig(_)
            | DashboardError::ConfigLoadFailed(_)
            | DashboardError::ConfigSaveFailed(_)) => {
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use goldstar_core::ValidationError;

    #[test]
    fn test_io_errors_are_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        assert!(matches!(StoreError::from(io), StoreError::Unavailable(_)));
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        let api: ApiError = CoreError::InsufficientStock {
            product: "Chess".to_string(),
            available: 0,
        }
        .into();
        assert_eq!(api.code, ErrorCode::InsufficientStock);
        assert_eq!(api.message, "Insufficient stock for Chess: available 0");

        let api: ApiError = CoreError::Validation(ValidationError::Required {
            field: "Product".to_string(),
        })
        .into();
        assert_eq!(api.code, ErrorCode::ValidationError);

        let api: ApiError = DashboardError::from(CoreError::ProductNotFound("Go".into())).into();
        assert_eq!(api.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_store_errors_map_to_codes() {
        let api: ApiError = StoreError::RowNotFound {
            collection: Collection::Stock,
            row: RowIndex(9),
        }
        .into();
        assert_eq!(api.code, ErrorCode::NotFound);

        let api: ApiError = DashboardError::from(StoreError::Unavailable("down".into())).into();
        assert_eq!(api.code, ErrorCode::StoreUnavailable);
    }

    #[test]
    fn test_error_code_serialization() {
        let api = ApiError::new(ErrorCode::StoreUnavailable, "offline");
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "STORE_UNAVAILABLE");
        assert_eq!(json["message"], "offline");
    }
}
