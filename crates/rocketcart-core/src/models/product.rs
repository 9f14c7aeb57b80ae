//! Catalog and inventory records as returned by the storefront API.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// A catalog product (`GET products/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

/// Available quantity for a product (`GET stock/{id}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

impl Stock {
    /// Whether `requested` units can be covered by this stock level.
    /// Negative requests are never covered.
    pub fn covers(&self, requested: i64) -> bool {
        requested >= 0 && requested <= i64::from(self.amount)
    }
}
