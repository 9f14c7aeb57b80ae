//! Cart line items.
//!
//! The serialized form of a `CartItem` is also the persisted form: a stored
//! cart is a plain JSON array of these objects.

use serde::{Deserialize, Serialize};

use super::Product;

/// Catalog identifier of a product. Unique within a cart.
pub type ProductId = i64;

/// A single line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
}

impl CartItem {
    /// Build a fresh line (amount 1) from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            amount: 1,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// Totals derived from a cart snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CartSummary {
    pub distinct_items: usize,
    pub total_units: u64,
    pub subtotal: f64,
}

impl CartSummary {
    pub fn of(items: &[CartItem]) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            acc.distinct_items += 1;
            acc.total_units += u64::from(item.amount);
            acc.subtotal += item.line_total();
            acc
        })
    }

    pub fn is_empty(&self) -> bool {
        self.distinct_items == 0
    }
}
