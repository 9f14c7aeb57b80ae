//! REST API client module for the storefront catalog and stock services.
//!
//! This module provides the `ApiClient` for fetching product metadata and
//! stock levels, and the `Catalog` / `StockLevels` traits the cart manager
//! depends on so that other sources (fixtures, test fakes) can stand in.

pub mod catalog;
pub mod client;
pub mod error;

pub use catalog::{Catalog, StockLevels};
pub use client::ApiClient;
pub use error::ApiError;
