use std::collections::HashMap;

use anyhow::Result;
use parking_lot::RwLock;

use super::Storage;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.get_item("k").expect("get").is_none());

        storage.set_item("k", "v1").expect("set");
        storage.set_item("k", "v2").expect("set");
        assert_eq!(storage.get_item("k").expect("get").as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("k").expect("remove");
        storage.remove_item("k").expect("remove twice");
        assert!(storage.is_empty());
    }
}
