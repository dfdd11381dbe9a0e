//! Catalog seeding command.
//!
//! Inserts a few sample products so a fresh install has something to show.
//! The referenced image ships with the static assets.
//!
//! # Usage
//!
//! ```bash
//! clover-cli seed
//! ```

use clover_core::Price;
use clover_web::db::{self, ProductRepository};

use super::{CliError, database_url};

/// Sample products: name and price.
const SAMPLE_PRODUCTS: &[(&str, &str)] = &[
    ("Garden Trowel", "12.50"),
    ("Watering Can", "18.00"),
    ("Seed Starter Kit", "9.99"),
    ("Canvas Apron", "24.00"),
];

/// Seed the catalog with sample products.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let products = ProductRepository::new(&pool);
    for (name, price) in SAMPLE_PRODUCTS {
        let price = Price::parse(price)
            .map_err(|e| CliError::InvalidInput(format!("sample price for {name}: {e}")))?;
        let product = products.create(name, price, "placeholder.svg").await?;
        tracing::info!(id = %product.id, name = %product.name, "seeded product");
    }

    tracing::info!("Seeding complete!");
    Ok(())
}
