//! # Dashboard Facade
//!
//! The operations a presentation layer calls: snapshots, mutations, filters
//! and summaries. Every call runs end-to-end against a freshly loaded
//! snapshot.
//!
//! ## Store Handle Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  App Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DashboardConfig::load(None)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Dashboard::open(config)                                                │
//! │       │  CsvStore::new(workbook_dir, worksheets).initialize()           │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │ Arc<dyn RecordStore>                    │  opened once, shared by    │
//! │  │   ├── StockRepository                   │  every repository for the  │
//! │  │   ├── TransactionRepository             │  life of the process       │
//! │  │   └── EnquiryRepository                 │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sell_one / filter_stock / transaction_summary / ...                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use tracing::{debug, info};

use goldstar_core::analytics::{EnquirySummary, StockSummary, TransactionSummary};
use goldstar_core::filter::filter;
use goldstar_core::ledger::{classify_low_stock, StockMutation};
use goldstar_core::{
    Enquiry, Money, NewEnquiry, NewProduct, NewTransaction, Predicates, Product, Transaction,
};

use crate::backend::{CsvStore, RecordStore};
use crate::config::DashboardConfig;
use crate::error::DashboardResult;
use crate::repository::{EnquiryRepository, StockRepository, TransactionRepository};

/// Entry point for every dashboard operation.
///
/// ## Usage
/// ```rust,ignore
/// let dashboard = Dashboard::open(DashboardConfig::load(None)?).await?;
///
/// dashboard.sell_one("Chess").await?;
/// let low = dashboard.low_stock().await?;
/// let summary = dashboard.transaction_summary().await?;
/// ```
#[derive(Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    stock: StockRepository,
    transactions: TransactionRepository,
    enquiries: EnquiryRepository,
}

impl Dashboard {
    /// Wraps an already-open store.
    pub fn new(store: Arc<dyn RecordStore>, config: DashboardConfig) -> Self {
        Dashboard {
            config,
            stock: StockRepository::new(store.clone()),
            transactions: TransactionRepository::new(store.clone()),
            enquiries: EnquiryRepository::new(store),
        }
    }

    /// Opens the CSV workbook named by the config, creating missing
    /// worksheets.
    pub async fn open(config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;

        let dir = config.workbook_dir();
        info!(workbook = %config.workbook.name, ?dir, "Opening workbook");

        let store = CsvStore::new(dir, config.worksheets.clone());
        store.initialize().await?;

        Ok(Self::new(Arc::new(store), config))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn stock(&self) -> &StockRepository {
        &self.stock
    }

    pub fn transactions(&self) -> &TransactionRepository {
        &self.transactions
    }

    pub fn enquiries(&self) -> &EnquiryRepository {
        &self.enquiries
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub async fn get_stock_snapshot(&self) -> DashboardResult<Vec<Product>> {
        Ok(self.stock.snapshot().await?)
    }

    pub async fn get_transaction_snapshot(&self) -> DashboardResult<Vec<Transaction>> {
        Ok(self.transactions.snapshot().await?)
    }

    pub async fn get_enquiry_snapshot(&self) -> DashboardResult<Vec<Enquiry>> {
        Ok(self.enquiries.snapshot().await?)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Reduces the product's quantity by one.
    pub async fn sell_one(&self, product: &str) -> DashboardResult<StockMutation> {
        self.stock.sell_one(product).await
    }

    /// Increases the product's quantity by one.
    pub async fn purchase_one(&self, product: &str) -> DashboardResult<StockMutation> {
        self.stock.purchase_one(product).await
    }

    pub async fn add_product(&self, product: &NewProduct) -> DashboardResult<()> {
        self.stock.add(product).await
    }

    pub async fn add_transaction(&self, entry: &NewTransaction) -> DashboardResult<()> {
        Ok(self.transactions.add(entry).await?)
    }

    pub async fn add_enquiry(&self, enquiry: &NewEnquiry) -> DashboardResult<()> {
        Ok(self.enquiries.add(enquiry).await?)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn filter_stock(&self, predicates: &Predicates) -> DashboardResult<Vec<Product>> {
        let snapshot = self.stock.snapshot().await?;
        let matched = filter(&snapshot, predicates);
        debug!(total = snapshot.len(), matched = matched.len(), "Filtered stock");
        Ok(matched)
    }

    pub async fn filter_transactions(
        &self,
        predicates: &Predicates,
    ) -> DashboardResult<Vec<Transaction>> {
        let snapshot = self.transactions.snapshot().await?;
        let matched = filter(&snapshot, predicates);
        debug!(total = snapshot.len(), matched = matched.len(), "Filtered transactions");
        Ok(matched)
    }

    pub async fn filter_enquiries(&self, predicates: &Predicates) -> DashboardResult<Vec<Enquiry>> {
        let snapshot = self.enquiries.snapshot().await?;
        let matched = filter(&snapshot, predicates);
        debug!(total = snapshot.len(), matched = matched.len(), "Filtered enquiries");
        Ok(matched)
    }

    /// Products at or below the configured low-stock threshold.
    pub async fn low_stock(&self) -> DashboardResult<Vec<Product>> {
        let snapshot = self.stock.snapshot().await?;
        Ok(
            classify_low_stock(&snapshot, self.config.analytics.low_stock_threshold)
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    pub async fn stock_summary(&self) -> DashboardResult<StockSummary> {
        let snapshot = self.stock.snapshot().await?;
        Ok(StockSummary::build(&snapshot, &self.config.limits()))
    }

    pub async fn transaction_summary(&self) -> DashboardResult<TransactionSummary> {
        let snapshot = self.transactions.snapshot().await?;
        Ok(TransactionSummary::build(&snapshot, &self.config.limits()))
    }

    pub async fn enquiry_summary(&self) -> DashboardResult<EnquirySummary> {
        let snapshot = self.enquiries.snapshot().await?;
        Ok(EnquirySummary::build(&snapshot, &self.config.limits()))
    }

    /// Formats an amount with the configured currency symbol.
    pub fn format_money(&self, amount: Money) -> String {
        amount.display_with(&self.config.display.currency_symbol)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;
    use crate::error::{ApiError, DashboardError, ErrorCode, StoreError};
    use chrono::NaiveDate;
    use goldstar_core::filter::{StockFilter, TransactionFilter};
    use goldstar_core::{Collection, CoreError};

    fn shop() -> (Arc<MemoryStore>, Dashboard) {
        let store = Arc::new(
            MemoryStore::new()
                .with_rows(
                    Collection::Stock,
                    vec![
                        vec!["Chess", "10", "1", "No"],
                        vec!["Carrom Board", "1200", "4", "No"],
                        vec!["Ludo", "150", "0", "Yes"],
                    ],
                )
                .with_rows(
                    Collection::Transactions,
                    vec![
                        vec!["2024-03-01", "Uno", "", "", "Asha", "98450", "150", "UPI", ""],
                        vec!["2024-03-01", "", "Chess", "", "Ravi", "90000", "500", "Cash", ""],
                        vec!["2024-03-02", "Uno", "", "", "Asha", "98450", "abc", "Cash", ""],
                    ],
                )
                .with_rows(
                    Collection::Enquiries,
                    vec![
                        vec!["2024-03-01", "Meena", "91111", "PS5", "Price?"],
                        vec!["2024-03-02", "Ravi", "90000", "PS5", "Stock?"],
                    ],
                ),
        );
        let dashboard = Dashboard::new(store.clone(), DashboardConfig::default());
        (store, dashboard)
    }

    #[tokio::test]
    async fn test_chess_scenario_end_to_end() {
        let (store, dashboard) = shop();

        let low: Vec<String> = dashboard
            .low_stock()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(low, vec!["Chess", "Ludo"]);

        dashboard.sell_one("Chess").await.unwrap();
        assert_eq!(store.rows(Collection::Stock).await[0][2], "0");

        let err = dashboard.sell_one("Chess").await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Core(CoreError::InsufficientStock { .. })
        ));
        assert_eq!(ApiError::from(err).code, ErrorCode::InsufficientStock);
        assert_eq!(store.rows(Collection::Stock).await[0][2], "0");
    }

    #[tokio::test]
    async fn test_filters() {
        let (_store, dashboard) = shop();

        let boards = dashboard
            .filter_stock(&Predicates::from(&StockFilter {
                product: "BOARD".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].name, "Carrom Board");

        let all = dashboard.filter_stock(&Predicates::new()).await.unwrap();
        assert_eq!(all, dashboard.get_stock_snapshot().await.unwrap());

        let cash = dashboard
            .filter_transactions(&Predicates::from(&TransactionFilter {
                payment_mode: "cash".to_string(),
                amount: "50".to_string(),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(cash.len(), 1);
        assert_eq!(cash[0].customer_name, "Ravi");

        let ps5 = dashboard
            .filter_enquiries(&Predicates::new().with("PRODUCT DETAIL", "ps"))
            .await
            .unwrap();
        assert_eq!(ps5.len(), 2);
    }

    #[tokio::test]
    async fn test_summaries() {
        let (_store, dashboard) = shop();

        let stock = dashboard.stock_summary().await.unwrap();
        assert_eq!(stock.total_products, 3);
        assert_eq!(stock.total_quantity, 5);
        assert_eq!(stock.total_stock_value, Money::from_cents(481000));
        assert_eq!(dashboard.format_money(stock.total_stock_value), "₹4810.00");

        let tx = dashboard.transaction_summary().await.unwrap();
        assert_eq!(tx.entry_count, 3);
        assert_eq!(tx.total_amount, Money::from_cents(65000));
        assert_eq!(tx.distinct_customers, 2);
        assert_eq!(tx.top_customers[0].key, "Ravi");
        assert_eq!(tx.top_sold_products[0].key, "Uno");
        assert_eq!(tx.top_sold_products[0].value, 2.0);

        let enquiries = dashboard.enquiry_summary().await.unwrap();
        assert_eq!(enquiries.total_enquiries, 2);
        assert_eq!(enquiries.top_products[0].key, "PS5");
        assert_eq!(enquiries.top_products[0].value, 2.0);
    }

    #[tokio::test]
    async fn test_appends_show_up_in_next_snapshot() {
        let (_store, dashboard) = shop();
        let date = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();

        dashboard
            .add_transaction(&NewTransaction {
                date,
                sales_item: "Chess".to_string(),
                purchased_item: String::new(),
                service_item: String::new(),
                customer_name: "Meena".to_string(),
                phone: "91111".to_string(),
                amount: "10".to_string(),
                payment_mode: "Card".to_string(),
                notes: String::new(),
            })
            .await
            .unwrap();
        dashboard
            .add_enquiry(&NewEnquiry {
                date,
                customer_name: "Asha".to_string(),
                phone: "98450".to_string(),
                product_detail: "Xbox".to_string(),
                content: String::new(),
            })
            .await
            .unwrap();
        dashboard
            .add_product(&NewProduct {
                name: "Jenga".to_string(),
                price: Money::from_cents(49900),
                quantity: 2,
                reorder: "No".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(dashboard.get_transaction_snapshot().await.unwrap().len(), 4);
        assert_eq!(dashboard.get_enquiry_snapshot().await.unwrap().len(), 3);
        let stock = dashboard.get_stock_snapshot().await.unwrap();
        assert_eq!(stock[3].name, "Jenga");
        assert_eq!(stock[3].quantity_in_hand, 2);
    }

    #[tokio::test]
    async fn test_offline_store_propagates() {
        let (store, dashboard) = shop();
        store.set_offline(true);

        let err = dashboard.transaction_summary().await.unwrap_err();
        assert!(matches!(err, DashboardError::Store(StoreError::Unavailable(_))));
        assert_eq!(ApiError::from(err).code, ErrorCode::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_threshold_comes_from_config() {
        let (store, _) = shop();
        let dashboard = Dashboard::new(store, DashboardConfig::new().low_stock_threshold(4));
        assert_eq!(dashboard.low_stock().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_open_creates_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::new().data_dir(dir.path());

        let dashboard = Dashboard::open(config).await.unwrap();
        assert!(dashboard.get_stock_snapshot().await.unwrap().is_empty());
        assert!(dir
            .path()
            .join("Gold Star Games")
            .join("Games Stock.csv")
            .exists());
    }
}
