//! rocketcart - a client-side shopping cart backed by local storage.
//!
//! The `CartManager` keeps an ordered list of cart lines, checks every change
//! against the storefront's catalog and stock services, and writes the whole
//! cart back to a key-value `Storage` after each change.

pub mod api;
pub mod cart;
pub mod config;
pub mod models;
pub mod notify;
pub mod storage;
pub mod utils;

pub use api::{ApiClient, ApiError, Catalog, StockLevels};
pub use cart::{CartChange, CartError, CartManager, CartOperation, ErrorKind};
pub use config::Config;
pub use models::{CartItem, CartSummary, Product, ProductId, Stock};
pub use notify::{Notifier, TracingNotifier};
pub use storage::{FileStorage, MemoryStorage, Storage, CART_STORAGE_KEY};
