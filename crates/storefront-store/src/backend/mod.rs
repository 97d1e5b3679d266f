//! # Storage Backends
//!
//! A key-value slot abstraction with two implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore<S: KeyValueStore>                                           │
//! │       │                                                                 │
//! │       │  get("cart") / put("cart", json)                               │
//! │       ▼                                                                 │
//! │  ┌─────────────────┐        ┌─────────────────────────────────┐        │
//! │  │  MemoryStore    │        │  FileStore                      │        │
//! │  │  HashMap        │        │  <data_dir>/<key>.json          │        │
//! │  │  (tests, demo)  │        │  temp file + rename             │        │
//! │  └─────────────────┘        └─────────────────────────────────┘        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod file;
pub mod memory;

use crate::error::StoreResult;

/// A string-valued key-value store.
///
/// Values are whole snapshots; `put` replaces the previous value.
pub trait KeyValueStore {
    /// Returns the value for `key`, or `None` if the slot is empty.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the value for `key`.
    fn put(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Empties the slot. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}
