//! Seams between the cart manager and the remote catalog/stock services.

use async_trait::async_trait;

use crate::models::{Product, ProductId, Stock};

use super::{ApiClient, ApiError};

/// Product metadata source.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Look up a product. `Ok(None)` when the catalog has no such product.
    async fn product(&self, id: ProductId) -> Result<Option<Product>, ApiError>;
}

/// Inventory source. Consulted on every operation, never cached.
#[async_trait]
pub trait StockLevels: Send + Sync {
    async fn stock(&self, id: ProductId) -> Result<Stock, ApiError>;
}

#[async_trait]
impl Catalog for ApiClient {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        self.fetch_product(id).await
    }
}

#[async_trait]
impl StockLevels for ApiClient {
    async fn stock(&self, id: ProductId) -> Result<Stock, ApiError> {
        self.fetch_stock(id).await
    }
}
