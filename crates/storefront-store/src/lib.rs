//! # storefront-store: Cart Persistence for the Storefront
//!
//! Owns the live cart and keeps a snapshot of it in a key-value slot so the
//! cart survives restarts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  storefront-cli command (add 1 2)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  CartStore    │    │   backend     │    │    error     │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Cart          │───►│ MemoryStore   │    │ StoreError   │  │   │
//! │  │   │ Arc<Catalog>  │    │ FileStore     │    │ StoreResult  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              <data_dir>/cart.json (JSON array of lines)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`cart_store`] - The stateful cart owner
//! - [`backend`] - Key-value slot implementations
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust
//! use storefront_core::{fallback_catalog, ProductId};
//! use storefront_store::{CartStore, MemoryStore};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(fallback_catalog());
//! let mut store = CartStore::open(MemoryStore::new());
//! store.attach_catalog(Arc::clone(&catalog));
//!
//! let laptop = catalog.get(ProductId::new(1)).unwrap();
//! assert!(store.add_item(laptop, 2).is_applied());
//! assert_eq!(store.totals().item_count, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod cart_store;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::file::{default_data_dir, FileStore};
pub use backend::memory::MemoryStore;
pub use backend::KeyValueStore;
pub use cart_store::CartStore;
pub use error::{StoreError, StoreResult};
