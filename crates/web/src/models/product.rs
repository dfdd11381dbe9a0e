//! Product domain types.

use chrono::{DateTime, Utc};

use clover_core::{Price, ProductId};

/// A catalog product (domain type).
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price, displayed with two fractional digits.
    pub price: Price,
    /// Filename of the product image inside the static asset directory.
    pub img: String,
    /// When the product was created; listings follow insertion order.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// URL under which the product image is served.
    #[must_use]
    pub fn image_url(&self) -> String {
        format!("/static/{}", self.img)
    }
}
