//! # Dashboard Configuration
//!
//! Where the workbook lives, what its worksheets are called, and the
//! analytics thresholds.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults            "Gold Star Games", threshold 1, top 5/10/5/5    │
//! │  2. dashboard.toml      <config dir>/goldstar/dashboard.toml            │
//! │  3. GOLDSTAR_* env      GOLDSTAR_DATA_DIR, GOLDSTAR_STOCK_SHEET, ...    │
//! │  4. validate()          reject before anything touches the workbook     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use goldstar_core::analytics::SummaryLimits;
use goldstar_core::Collection;

use crate::error::{DashboardError, DashboardResult};

// =============================================================================
// Workbook Settings
// =============================================================================

/// Which workbook to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookSettings {
    /// Workbook name; the CSV backend uses it as the directory name.
    #[serde(default = "default_workbook_name")]
    pub name: String,

    /// Parent directory of the workbook.
    /// Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_workbook_name() -> String {
    "Gold Star Games".to_string()
}

impl Default for WorkbookSettings {
    fn default() -> Self {
        WorkbookSettings {
            name: default_workbook_name(),
            data_dir: None,
        }
    }
}

// =============================================================================
// Worksheet Settings
// =============================================================================

/// Worksheet name per collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetSettings {
    #[serde(default = "default_stock_sheet")]
    pub stock: String,

    #[serde(default = "default_transactions_sheet")]
    pub transactions: String,

    #[serde(default = "default_enquiries_sheet")]
    pub enquiries: String,
}

fn default_stock_sheet() -> String {
    "Games Stock".to_string()
}

fn default_transactions_sheet() -> String {
    "new day to day".to_string()
}

fn default_enquiries_sheet() -> String {
    "Enquiry".to_string()
}

impl Default for WorksheetSettings {
    fn default() -> Self {
        WorksheetSettings {
            stock: default_stock_sheet(),
            transactions: default_transactions_sheet(),
            enquiries: default_enquiries_sheet(),
        }
    }
}

impl WorksheetSettings {
    pub fn name_for(&self, collection: Collection) -> &str {
        match collection {
            Collection::Stock => &self.stock,
            Collection::Transactions => &self.transactions,
            Collection::Enquiries => &self.enquiries,
        }
    }
}

// =============================================================================
// Analytics Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Quantity at or below which a product is low on stock.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,

    #[serde(default = "default_top_customers")]
    pub top_customers: usize,

    #[serde(default = "default_top_sold_products")]
    pub top_sold_products: usize,

    #[serde(default = "default_top_enquiry_products")]
    pub top_enquiry_products: usize,

    #[serde(default = "default_top_enquiry_customers")]
    pub top_enquiry_customers: usize,
}

fn default_low_stock_threshold() -> i64 {
    goldstar_core::DEFAULT_LOW_STOCK_THRESHOLD
}
fn default_top_customers() -> usize {
    goldstar_core::DEFAULT_TOP_CUSTOMERS
}
fn default_top_sold_products() -> usize {
    goldstar_core::DEFAULT_TOP_SOLD_PRODUCTS
}
fn default_top_enquiry_products() -> usize {
    goldstar_core::DEFAULT_TOP_ENQUIRY_PRODUCTS
}
fn default_top_enquiry_customers() -> usize {
    goldstar_core::DEFAULT_TOP_ENQUIRY_CUSTOMERS
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        AnalyticsSettings {
            low_stock_threshold: default_low_stock_threshold(),
            top_customers: default_top_customers(),
            top_sold_products: default_top_sold_products(),
            top_enquiry_products: default_top_enquiry_products(),
            top_enquiry_customers: default_top_enquiry_customers(),
        }
    }
}

impl From<&AnalyticsSettings> for SummaryLimits {
    fn from(settings: &AnalyticsSettings) -> Self {
        SummaryLimits {
            low_stock_threshold: settings.low_stock_threshold,
            top_customers: settings.top_customers,
            top_sold_products: settings.top_sold_products,
            top_enquiry_products: settings.top_enquiry_products,
            top_enquiry_customers: settings.top_enquiry_customers,
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for formatted money ("₹", "$").
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete dashboard configuration.
///
/// ## Example Config File
/// ```toml
/// [workbook]
/// name = "Gold Star Games"
/// data_dir = "/srv/goldstar"
///
/// [worksheets]
/// stock = "Games Stock"
/// transactions = "new day to day"
/// enquiries = "Enquiry"
///
/// [analytics]
/// low_stock_threshold = 1
/// top_customers = 5
/// top_sold_products = 10
///
/// [display]
/// currency_symbol = "₹"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub workbook: WorkbookSettings,

    #[serde(default)]
    pub worksheets: WorksheetSettings,

    #[serde(default)]
    pub analytics: AnalyticsSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workbook parent directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workbook.data_dir = Some(dir.into());
        self
    }

    /// Sets the low-stock threshold.
    pub fn low_stock_threshold(mut self, threshold: i64) -> Self {
        self.analytics.low_stock_threshold = threshold;
        self
    }

    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> DashboardResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading dashboard config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| DashboardError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)
                    .map_err(|e| DashboardError::ConfigLoadFailed(e.to_string()))?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load dashboard config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> DashboardResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| DashboardError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DashboardError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| DashboardError::ConfigSaveFailed(e.to_string()))?;
        std::fs::write(&path, contents)
            .map_err(|e| DashboardError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Dashboard config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.workbook.name.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "workbook name must not be empty".into(),
            ));
        }

        let names: Vec<&str> = Collection::ALL
            .iter()
            .map(|c| self.worksheets.name_for(*c))
            .collect();
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(DashboardError::InvalidConfig(format!(
                    "worksheet name for {} must not be empty",
                    Collection::ALL[i]
                )));
            }
            if name.contains(['/', '\\']) {
                return Err(DashboardError::InvalidConfig(format!(
                    "worksheet name '{}' must not contain a path separator",
                    name
                )));
            }
            if names[..i].contains(name) {
                return Err(DashboardError::InvalidConfig(format!(
                    "worksheet name '{}' is used twice",
                    name
                )));
            }
        }

        let analytics = &self.analytics;
        let sizes = [
            ("top_customers", analytics.top_customers),
            ("top_sold_products", analytics.top_sold_products),
            ("top_enquiry_products", analytics.top_enquiry_products),
            ("top_enquiry_customers", analytics.top_enquiry_customers),
        ];
        if let Some((field, _)) = sizes.iter().find(|(_, n)| *n == 0) {
            return Err(DashboardError::InvalidConfig(format!(
                "{} must be greater than 0",
                field
            )));
        }

        Ok(())
    }

    /// Applies `GOLDSTAR_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("GOLDSTAR_WORKBOOK") {
            debug!(workbook = %name, "Overriding workbook name from environment");
            self.workbook.name = name;
        }

        if let Some(dir) = lookup("GOLDSTAR_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.workbook.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(name) = lookup("GOLDSTAR_STOCK_SHEET") {
            self.worksheets.stock = name;
        }

        if let Some(name) = lookup("GOLDSTAR_TRANSACTIONS_SHEET") {
            self.worksheets.transactions = name;
        }

        if let Some(name) = lookup("GOLDSTAR_ENQUIRIES_SHEET") {
            self.worksheets.enquiries = name;
        }

        if let Some(threshold) = lookup("GOLDSTAR_LOW_STOCK_THRESHOLD") {
            match threshold.parse::<i64>() {
                Ok(t) => {
                    debug!(threshold = t, "Overriding low-stock threshold from environment");
                    self.analytics.low_stock_threshold = t;
                }
                Err(_) => warn!(value = %threshold, "Ignoring non-numeric low-stock threshold"),
            }
        }

        if let Some(symbol) = lookup("GOLDSTAR_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "goldstar", "dashboard")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("dashboard.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Directory of the CSV workbook.
    pub fn workbook_dir(&self) -> PathBuf {
        let parent = self
            .workbook
            .data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("data"));
        parent.join(&self.workbook.name)
    }

    /// Ranking sizes and threshold for the summaries.
    pub fn limits(&self) -> SummaryLimits {
        SummaryLimits::from(&self.analytics)
    }
}
