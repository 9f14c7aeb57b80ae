use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use crate::api::{Catalog, StockLevels};
use crate::models::{CartItem, CartSummary, Product, ProductId, Stock};
use crate::notify::Notifier;
use crate::storage::{Storage, CART_STORAGE_KEY};

use super::{CartError, CartOperation, CartPersistence};

/// What a successful operation did to the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartChange {
    /// A new line was appended with amount 1.
    Added(CartItem),
    /// An existing line's amount was replaced.
    AmountChanged {
        product_id: ProductId,
        from: u32,
        to: u32,
    },
    Removed(CartItem),
    Cleared {
        removed: usize,
    },
    /// Nothing to do (non-positive amount, or clearing an empty cart).
    Unchanged,
}

/// Owns the cart and mediates every change against the catalog and stock
/// services.
pub struct CartManager {
    items: Mutex<Vec<CartItem>>,
    snapshots: watch::Sender<Vec<CartItem>>,
    catalog: Arc<dyn Catalog>,
    stock: Arc<dyn StockLevels>,
    persistence: CartPersistence,
    notifier: Option<Arc<dyn Notifier>>,
}

impl CartManager {
    /// Create a manager whose cart is read from `storage` under the default key.
    pub fn load(
        storage: Arc<dyn Storage>,
        catalog: Arc<dyn Catalog>,
        stock: Arc<dyn StockLevels>,
    ) -> Self {
        Self::with_persistence(CartPersistence::new(storage, CART_STORAGE_KEY), catalog, stock)
    }

    pub fn with_persistence(
        persistence: CartPersistence,
        catalog: Arc<dyn Catalog>,
        stock: Arc<dyn StockLevels>,
    ) -> Self {
        let items = persistence.load();
        info!(items = items.len(), key = persistence.key(), "Cart loaded");
        let (snapshots, _) = watch::channel(items.clone());

        Self {
            items: Mutex::new(items),
            snapshots,
            catalog,
            stock,
            persistence,
            notifier: None,
        }
    }

    /// Report every failed operation through `notifier` as well as returning it.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Tear down the manager and hand back its contents. Nothing is written:
    /// every change was already persisted when it was made, and a cart that
    /// failed to load must not overwrite what is in storage.
    pub fn dispose(self) -> Vec<CartItem> {
        let items = self.items.into_inner();
        debug!(items = items.len(), "Cart disposed");
        items
    }

    // ===== Reading =====

    /// The cart as of the last completed operation.
    pub fn cart(&self) -> Vec<CartItem> {
        self.snapshots.borrow().clone()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.snapshots.borrow())
    }

    /// Receive a new snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.snapshots.subscribe()
    }

    // ===== Operations =====

    /// Add one unit of a product, appending a new line if it is not in the cart yet.
    pub async fn add_product(&self, product_id: ProductId) -> Result<CartChange, CartError> {
        let result = self.add(product_id).await;
        self.report(&result);
        result
    }

    /// Remove a product's line entirely.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<CartChange, CartError> {
        let result = self.remove(product_id).await;
        self.report(&result);
        result
    }

    /// Set a line's amount. A non-positive amount is ignored.
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<CartChange, CartError> {
        let result = self.update(product_id, amount).await;
        self.report(&result);
        result
    }

    /// Empty the cart.
    pub async fn clear(&self) -> CartChange {
        let mut items = self.items.lock().await;
        if items.is_empty() {
            return CartChange::Unchanged;
        }
        let removed = items.len();
        items.clear();
        self.commit(&items);
        info!(removed, "Cart cleared");
        CartChange::Cleared { removed }
    }

    async fn add(&self, product_id: ProductId) -> Result<CartChange, CartError> {
        let operation = CartOperation::Add;
        let mut items = self.items.lock().await;

        let product = self.fetch_product(operation, product_id).await?;
        let stock = self.fetch_stock(operation, product_id).await?;

        let position = items.iter().position(|item| item.id == product_id);
        let current = position.map_or(0, |index| items[index].amount);
        let requested = current.saturating_add(1);
        Self::check_stock(operation, product_id, &stock, i64::from(requested))?;

        let change = match position {
            Some(index) => {
                items[index].amount = requested;
                CartChange::AmountChanged {
                    product_id,
                    from: current,
                    to: requested,
                }
            }
            None => {
                let item = CartItem {
                    id: product_id,
                    ..CartItem::from_product(&product)
                };
                items.push(item.clone());
                CartChange::Added(item)
            }
        };

        self.commit(&items);
        info!(product_id, amount = requested, "Product added to cart");
        Ok(change)
    }

    async fn remove(&self, product_id: ProductId) -> Result<CartChange, CartError> {
        let operation = CartOperation::Remove;
        let mut items = self.items.lock().await;

        self.fetch_product(operation, product_id).await?;

        let index = Self::position(&items, operation, product_id)?;
        let removed = items.remove(index);

        self.commit(&items);
        info!(product_id, "Product removed from cart");
        Ok(CartChange::Removed(removed))
    }

    async fn update(&self, product_id: ProductId, amount: i64) -> Result<CartChange, CartError> {
        let operation = CartOperation::Update;
        let mut items = self.items.lock().await;

        self.fetch_product(operation, product_id).await?;

        if amount <= 0 {
            debug!(product_id, amount, "Ignoring non-positive amount");
            return Ok(CartChange::Unchanged);
        }

        let index = Self::position(&items, operation, product_id)?;
        let stock = self.fetch_stock(operation, product_id).await?;
        let to = Self::check_stock(operation, product_id, &stock, amount)?;

        let from = items[index].amount;
        items[index].amount = to;

        self.commit(&items);
        info!(product_id, from, to, "Product amount updated");
        Ok(CartChange::AmountChanged { product_id, from, to })
    }

    // ===== Helpers =====

    async fn fetch_product(
        &self,
        operation: CartOperation,
        product_id: ProductId,
    ) -> Result<Product, CartError> {
        match self.catalog.product(product_id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(CartError::ProductNotFound {
                operation,
                product_id,
            }),
            Err(source) => Err(CartError::Transient {
                operation,
                product_id,
                source,
            }),
        }
    }

    async fn fetch_stock(
        &self,
        operation: CartOperation,
        product_id: ProductId,
    ) -> Result<Stock, CartError> {
        self.stock
            .stock(product_id)
            .await
            .map_err(|source| CartError::Transient {
                operation,
                product_id,
                source,
            })
    }

    /// Returns the requested amount as a line amount if the stock covers it.
    fn check_stock(
        operation: CartOperation,
        product_id: ProductId,
        stock: &Stock,
        requested: i64,
    ) -> Result<u32, CartError> {
        let exceeded = || CartError::StockExceeded {
            operation,
            product_id,
            requested,
            available: stock.amount,
        };
        if !stock.covers(requested) {
            return Err(exceeded());
        }
        u32::try_from(requested).map_err(|_| exceeded())
    }

    fn position(
        items: &[CartItem],
        operation: CartOperation,
        product_id: ProductId,
    ) -> Result<usize, CartError> {
        items
            .iter()
            .position(|item| item.id == product_id)
            .ok_or(CartError::NotInCart {
                operation,
                product_id,
            })
    }

    /// Persist and publish the cart. Runs with the cart lock held.
    fn commit(&self, items: &[CartItem]) {
        self.persistence.sync(items);
        self.snapshots.send_replace(items.to_vec());
    }

    fn report(&self, result: &Result<CartChange, CartError>) {
        if let Err(e) = result {
            debug!(error = %e, "Cart operation failed");
            if let Some(notifier) = &self.notifier {
                notifier.error(e.user_message());
            }
        }
    }
}
