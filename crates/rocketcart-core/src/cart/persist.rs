use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::CartItem;
use crate::storage::Storage;

/// Reads and writes the whole cart under a single storage key.
#[derive(Clone)]
pub struct CartPersistence {
    storage: Arc<dyn Storage>,
    key: String,
}

impl CartPersistence {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored cart. Never fails: a missing, unreadable or
    /// unparsable blob yields an empty cart.
    pub fn load(&self) -> Vec<CartItem> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored cart, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<CartItem>>(&raw) {
            Ok(items) => {
                let items = Self::sanitize(items);
                debug!(key = %self.key, items = items.len(), "Loaded stored cart");
                items
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart is not valid, starting empty");
                Vec::new()
            }
        }
    }

    /// Drop lines that break the cart invariants (zero amount, repeated id).
    /// The first line for an id wins.
    fn sanitize(items: Vec<CartItem>) -> Vec<CartItem> {
        let total = items.len();
        let mut seen = HashSet::new();
        let kept: Vec<CartItem> = items
            .into_iter()
            .filter(|item| item.amount > 0 && seen.insert(item.id))
            .collect();
        if kept.len() != total {
            warn!(dropped = total - kept.len(), "Dropped invalid lines from stored cart");
        }
        kept
    }

    /// Serialize the full cart and write it. Failures are logged, not returned:
    /// the in-memory cart stays authoritative.
    pub fn sync(&self, items: &[CartItem]) {
        if let Err(e) = self.write(items) {
            warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }

    fn write(&self, items: &[CartItem]) -> Result<()> {
        let raw = serde_json::to_string(items).context("Failed to serialize cart")?;
        self.storage.set_item(&self.key, &raw)?;
        debug!(key = %self.key, items = items.len(), "Persisted cart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, CART_STORAGE_KEY};

    fn item(id: i64, amount: u32) -> CartItem {
        CartItem {
            id,
            title: format!("Tênis {}", id),
            price: 100.0 + id as f64,
            image: format!("https://cdn.example.com/tenis{}.jpg", id),
            amount,
        }
    }

    fn persistence() -> (Arc<MemoryStorage>, CartPersistence) {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = CartPersistence::new(storage.clone(), CART_STORAGE_KEY);
        (storage, persistence)
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let (_, persistence) = persistence();
        let items = vec![item(3, 1), item(1, 4), item(2, 2)];
        persistence.sync(&items);
        assert_eq!(persistence.load(), items);
    }

    #[test]
    fn test_stored_form_is_plain_array() {
        let (storage, persistence) = persistence();
        persistence.sync(&[item(1, 2)]);
        let raw = storage.get_item(CART_STORAGE_KEY).expect("get").expect("stored");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["amount"], 2);
    }

    #[test]
    fn test_missing_blob_is_empty() {
        let (_, persistence) = persistence();
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_unparsable_blob_is_empty() {
        let (storage, persistence) = persistence();
        storage.set_item(CART_STORAGE_KEY, "{not json").expect("set");
        assert!(persistence.load().is_empty());

        storage.set_item(CART_STORAGE_KEY, r#"{"id": 1}"#).expect("set");
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_invalid_lines_dropped() {
        let (_, persistence) = persistence();
        persistence.sync(&[item(1, 1), item(2, 0), item(1, 5), item(3, 2)]);
        let loaded = persistence.load();
        assert_eq!(loaded, vec![item(1, 1), item(3, 2)]);
    }
}
