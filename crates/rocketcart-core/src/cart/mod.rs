//! Cart state management.
//!
//! This module provides the `CartManager`, which owns the ordered list of
//! cart lines, validates every change against the catalog and stock
//! services, and writes the full cart back to storage after each change.
//!
//! Operations on one manager are serialized: each holds the cart lock from
//! its first fetch until its change is persisted.

pub mod error;
pub mod manager;
pub mod persist;

pub use error::{CartError, CartOperation, ErrorKind};
pub use manager::{CartChange, CartManager};
pub use persist::CartPersistence;
