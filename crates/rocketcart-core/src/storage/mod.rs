//! Local key-value storage for the persisted cart.
//!
//! This module provides the `Storage` trait, a string key-value store that
//! survives restarts, and two implementations:
//! - `FileStorage`: one JSON file per key under a directory
//! - `MemoryStorage`: process-local map for tests and throwaway sessions

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use anyhow::Result;

/// Key under which the cart blob is stored.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
