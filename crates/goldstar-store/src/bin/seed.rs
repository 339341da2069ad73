//! # Seed Data Generator
//!
//! Populates a CSV workbook with sample stock, transactions and enquiries
//! for development.
//!
//! ## Usage
//! ```bash
//! # Seed the configured workbook with 40 products (default)
//! cargo run -p goldstar-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p goldstar-store --bin seed -- --count 200
//!
//! # Specify workbook directory
//! cargo run -p goldstar-store --bin seed -- --dir ./data/demo
//! ```
//!
//! ## Generated Data
//! - Products: `{title} {edition}`, price 99.00 - 4,999.00, qty 0 - 12
//! - Transactions: one per product, every fifth amount left malformed
//! - Enquiries: one per two products

use chrono::{Days, NaiveDate};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use goldstar_core::{Money, NewEnquiry, NewProduct, NewTransaction};
use goldstar_store::{CsvStore, Dashboard, DashboardConfig};

/// Board and video game titles for realistic test data
const TITLES: &[&str] = &[
    "Chess",
    "Ludo",
    "Carrom Board",
    "Uno",
    "Monopoly",
    "Scrabble",
    "Jenga",
    "Catan",
    "Pictionary",
    "Snakes & Ladders",
    "PS5 Controller",
    "FIFA 24",
    "Xbox Game Pass",
    "Rubik's Cube",
];

/// Editions multiply the catalogue
const EDITIONS: &[&str] = &["Classic", "Travel", "Deluxe"];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Asha", "98450 11223"),
    ("Ravi", "90000 45678"),
    ("Meena", "91111 22334"),
    ("Karthik", "99887 66554"),
    ("Fatima", "97654 32109"),
];

const PAYMENT_MODES: &[&str] = &["Cash", "UPI", "Card"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let config = DashboardConfig::load_or_default(None);
    let mut count: usize = 40;
    let mut dir: PathBuf = config.workbook_dir();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(40);
                    i += 1;
                }
            }
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Gold Star Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>      Number of products to generate (default: 40)");
                println!("  -d, --dir <PATH>     Workbook directory (default: from config)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Gold Star Seed Data Generator");
    println!("=============================");
    println!("Workbook: {}", dir.display());
    println!("Products: {}", count);
    println!();

    let store = CsvStore::new(&dir, config.worksheets.clone());
    store.initialize().await?;
    let dashboard = Dashboard::new(Arc::new(store), config);

    let existing = dashboard.get_stock_snapshot().await?.len();
    if existing > 0 {
        println!("Workbook already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the workbook directory to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let first_day = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;

    for seed in 0..count {
        let product = generate_product(seed);
        if let Err(e) = dashboard.add_product(&product).await {
            eprintln!("Failed to add {}: {}", product.name, e);
            continue;
        }

        let date = first_day
            .checked_add_days(Days::new((seed / 3) as u64))
            .unwrap_or(first_day);
        dashboard
            .add_transaction(&generate_transaction(seed, &product, date))
            .await?;

        if seed % 2 == 0 {
            dashboard
                .add_enquiry(&generate_enquiry(seed, &product, date))
                .await?;
        }
    }

    println!("Generated {} products in {:?}", count, start.elapsed());

    let summary = dashboard.stock_summary().await?;
    println!();
    println!("  Stock value: {}", dashboard.format_money(summary.total_stock_value));
    println!("  Low stock:   {} products", summary.low_stock_count);
    println!();
    println!("Seed complete!");

    Ok(())
}

/// Logs to stderr; `RUST_LOG` overrides the default `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,goldstar_store=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate_product(seed: usize) -> NewProduct {
    let title = TITLES[seed % TITLES.len()];
    let edition = EDITIONS[(seed / TITLES.len()) % EDITIONS.len()];

    // 99.00 - 4,999.00 in whole rupees
    let rupees = 99 + ((seed * 373) % 4901) as i64;

    NewProduct {
        name: format!("{} {}", title, edition),
        price: Money::from_cents(rupees * 100),
        quantity: ((seed * 7) % 13) as i64,
        reorder: if seed % 4 == 0 { "Yes" } else { "No" }.to_string(),
    }
}

fn generate_transaction(seed: usize, product: &NewProduct, date: NaiveDate) -> NewTransaction {
    let (name, phone) = CUSTOMERS[seed % CUSTOMERS.len()];
    let (sales_item, purchased_item, service_item) = match seed % 3 {
        0 | 1 => (product.name.clone(), String::new(), String::new()),
        _ => (String::new(), String::new(), "Console cleaning".to_string()),
    };

    // Hand-typed sheets carry the odd non-numeric amount
    let amount = if seed % 5 == 4 {
        "paid later".to_string()
    } else {
        product.price.to_string()
    };

    NewTransaction {
        date,
        sales_item,
        purchased_item,
        service_item,
        customer_name: name.to_string(),
        phone: phone.to_string(),
        amount,
        payment_mode: PAYMENT_MODES[seed % PAYMENT_MODES.len()].to_string(),
        notes: String::new(),
    }
}

fn generate_enquiry(seed: usize, product: &NewProduct, date: NaiveDate) -> NewEnquiry {
    let (name, phone) = CUSTOMERS[(seed / 2) % CUSTOMERS.len()];
    NewEnquiry {
        date,
        customer_name: name.to_string(),
        phone: phone.to_string(),
        product_detail: product.name.clone(),
        content: "Is this in stock?".to_string(),
    }
}
