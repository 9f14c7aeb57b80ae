//! Data models for the shopping cart.
//!
//! - `CartItem`, `CartSummary`: line items held in the cart and totals derived from them
//! - `Product`, `Stock`: catalog and inventory records fetched from the storefront API

pub mod cart;
pub mod product;

pub use cart::{CartItem, CartSummary, ProductId};
pub use product::{Product, Stock};
