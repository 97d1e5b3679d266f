//! # Cart Store
//!
//! The single owner of the live cart.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Lifecycle                                  │
//! │                                                                         │
//! │  Startup                                                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  CartStore::open(storage) ──► get("cart") ──► Cart::from_snapshot       │
//! │     │                          │ missing ──────► empty cart             │
//! │     │                          │ unreadable ───► empty cart (warn)      │
//! │     ▼                                                                   │
//! │  attach_catalog(Arc<Catalog>) ◄── canonical stock for every check       │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  add_item / update_quantity / remove_item / clear                       │
//! │     │                                                                   │
//! │     ├── CartOutcome::Applied ──► put("cart", snapshot)                  │
//! │     │                               │ failure ──► error! log, cart kept │
//! │     └── Unchanged / Rejected ──► nothing written                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is passed by `&mut` to whatever mutates it. There is no global
//! instance and no lock.

use std::sync::Arc;

use storefront_core::{
    Cart, CartOutcome, CartTotals, Catalog, Product, ProductId, RejectReason, CART_STORAGE_KEY,
};
use tracing::{debug, error, info, warn};

use crate::backend::KeyValueStore;
use crate::error::StoreResult;

/// Owns a [`Cart`] and keeps it persisted in a [`KeyValueStore`] slot.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    cart: Cart,
    storage: S,
    key: String,
    catalog: Option<Arc<Catalog>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Opens the store using the default `"cart"` slot.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, CART_STORAGE_KEY)
    }

    /// Opens the store and hydrates the cart from `key`.
    ///
    /// Read or parse failures are logged and yield an empty cart.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = hydrate(&storage, &key);

        CartStore {
            cart,
            storage,
            key,
            catalog: None,
        }
    }

    /// Sets the catalog used as the source of truth for stock.
    pub fn attach_catalog(&mut self, catalog: Arc<Catalog>) {
        debug!(products = catalog.len(), "Catalog attached to cart store");
        self.catalog = Some(catalog);
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` units of `product`.
    ///
    /// Stock comes from the attached catalog when it knows the product,
    /// otherwise from `product` itself.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> CartOutcome {
        let canonical = self
            .catalog
            .as_deref()
            .and_then(|c| c.get(product.id))
            .unwrap_or(product);

        let outcome = self.cart.add_item(canonical, quantity);
        self.after_mutation("add_item", product.id, outcome)
    }

    /// Sets the quantity of a line, bounded by canonical stock.
    ///
    /// The bound is the catalog's stock for `product_id`, or the stock
    /// recorded on the line when the catalog does not know the product.
    pub fn update_quantity(&mut self, product_id: ProductId, new_quantity: i64) -> CartOutcome {
        let line_stock = self.cart.find(product_id).map(|l| l.stock);
        if line_stock.is_none() && new_quantity > 0 {
            return self.after_mutation(
                "update_quantity",
                product_id,
                CartOutcome::Rejected(RejectReason::NotInCart),
            );
        }

        let max_stock = self.stock_of(product_id).or(line_stock).unwrap_or(0);
        let outcome = self.cart.update_quantity(product_id, new_quantity, max_stock);
        self.after_mutation("update_quantity", product_id, outcome)
    }

    pub fn remove_item(&mut self, product_id: ProductId) -> CartOutcome {
        let outcome = self.cart.remove_item(product_id);
        self.after_mutation("remove_item", product_id, outcome)
    }

    pub fn clear(&mut self) -> CartOutcome {
        let outcome = self.cart.clear();
        if outcome.is_applied() {
            info!("Cart cleared");
            self.persist();
        }
        outcome
    }

    /// Writes the current cart and returns the result.
    pub fn flush(&mut self) -> StoreResult<()> {
        let snapshot = self.cart.to_snapshot()?;
        self.storage.put(&self.key, &snapshot)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.cart.quantity_of(product_id)
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_deref()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Canonical stock from the attached catalog.
    fn stock_of(&self, product_id: ProductId) -> Option<u32> {
        self.catalog.as_deref().and_then(|c| c.stock_of(product_id))
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn after_mutation(&mut self, op: &str, product_id: ProductId, outcome: CartOutcome) -> CartOutcome {
        match outcome {
            CartOutcome::Applied => {
                debug!(op, product_id = %product_id, "Cart mutation applied");
                self.persist();
            }
            CartOutcome::Unchanged => {
                debug!(op, product_id = %product_id, "Cart mutation was a no-op");
            }
            CartOutcome::Rejected(reason) => {
                debug!(op, product_id = %product_id, %reason, "Cart mutation rejected");
            }
        }
        outcome
    }

    /// Writes the snapshot. Failures are logged and the in-memory cart is kept.
    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            error!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }
}

fn hydrate<S: KeyValueStore>(storage: &S, key: &str) -> Cart {
    let snapshot = match storage.get(key) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => {
            debug!(key, "No stored cart, starting empty");
            return Cart::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored cart, starting empty");
            return Cart::new();
        }
    };

    match Cart::from_snapshot(&snapshot) {
        Ok(cart) => {
            info!(key, lines = cart.line_count(), items = cart.total_item_count(), "Cart restored");
            cart
        }
        Err(e) => {
            warn!(key, error = %e, "Stored cart is unreadable, starting empty");
            Cart::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::file::FileStore;
    use crate::backend::memory::MemoryStore;
    use crate::error::StoreError;
    use storefront_core::{fallback_catalog, Money};
    use tempfile::TempDir;

    fn product(id: u32, cents: i64, stock: u32) -> Product {
        Product::new(ProductId::new(id), format!("Product {}", id), "test", Money::from_cents(cents), stock)
    }

    /// Accepts reads, refuses every write.
    #[derive(Debug, Default)]
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn put(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        fn remove(&mut self, _key: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_open_empty_storage() {
        let store = CartStore::open(MemoryStore::new());
        assert!(store.cart().is_empty());
        assert_eq!(store.key(), "cart");
    }

    #[test]
    fn test_corrupt_snapshot_hydrates_empty() {
        let store = CartStore::open(MemoryStore::with_value("cart", "{not json"));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_every_applied_mutation_persists() {
        let mut store = CartStore::open(MemoryStore::new());
        let p = product(1, 1000, 5);

        store.add_item(&p, 2);
        let saved = store.storage().get("cart").unwrap().unwrap();
        assert_eq!(Cart::from_snapshot(&saved).unwrap(), *store.cart());

        store.update_quantity(p.id, 4);
        let saved = store.storage().get("cart").unwrap().unwrap();
        assert_eq!(Cart::from_snapshot(&saved).unwrap().quantity_of(p.id), 4);

        store.remove_item(p.id);
        let saved = store.storage().get("cart").unwrap().unwrap();
        assert_eq!(saved, "[]");
    }

    #[test]
    fn test_rejection_does_not_write() {
        let mut store = CartStore::open(MemoryStore::new());
        let sold_out = product(3, 14999, 0);

        assert!(store.add_item(&sold_out, 1).is_rejected());
        assert_eq!(store.storage().get("cart").unwrap(), None);
    }

    #[test]
    fn test_catalog_stock_is_canonical() {
        let mut store = CartStore::open(MemoryStore::new());
        store.attach_catalog(Arc::new(fallback_catalog()));

        // Caller claims plenty of stock; the catalog says 5
        let camera = product(19, 59999, 100);
        assert_eq!(
            store.add_item(&camera, 6),
            CartOutcome::Rejected(RejectReason::ExceedsStock { requested: 6, available: 5 })
        );

        assert!(store.add_item(&camera, 5).is_applied());
        assert!(store.update_quantity(camera.id, 6).is_rejected());
        assert!(store.update_quantity(camera.id, 3).is_applied());
        assert_eq!(store.quantity_of(camera.id), 3);
    }

    #[test]
    fn test_restocked_quantity_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let before = product(7, 500, 2);
        {
            let mut store = CartStore::open(FileStore::new(dir.path()));
            assert!(store.add_item(&before, 2).is_applied());
        }

        let restocked = product(7, 500, 10);
        {
            let mut store = CartStore::open(FileStore::new(dir.path()));
            store.attach_catalog(Arc::new(Catalog::new(vec![restocked.clone()])));
            assert!(store.update_quantity(restocked.id, 8).is_applied());
            assert!(store.add_item(&restocked, 1).is_applied());
            assert_eq!(store.quantity_of(restocked.id), 9);
        }

        let reopened = CartStore::open(FileStore::new(dir.path()));
        assert_eq!(reopened.quantity_of(restocked.id), 9);
        assert_eq!(reopened.cart().find(restocked.id).map(|l| l.stock), Some(10));
    }

    #[test]
    fn test_update_falls_back_to_line_stock() {
        let mut store = CartStore::open(MemoryStore::new());
        store.attach_catalog(Arc::new(fallback_catalog()));

        let unlisted = product(500, 250, 4);
        assert!(store.add_item(&unlisted, 1).is_applied());
        assert!(store.update_quantity(unlisted.id, 4).is_applied());
        assert!(store.update_quantity(unlisted.id, 5).is_rejected());
        assert_eq!(store.quantity_of(unlisted.id), 4);
    }

    #[test]
    fn test_update_absent_and_zero() {
        let mut store = CartStore::open(MemoryStore::new());
        assert_eq!(
            store.update_quantity(ProductId::new(1), 2),
            CartOutcome::Rejected(RejectReason::NotInCart)
        );
        assert_eq!(store.update_quantity(ProductId::new(1), 0), CartOutcome::Unchanged);

        let p = product(1, 100, 3);
        store.add_item(&p, 2);
        assert_eq!(store.update_quantity(p.id, -1), CartOutcome::Applied);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_cart_in_memory() {
        let mut store = CartStore::open(ReadOnlyStore);
        let p = product(1, 1000, 2);

        assert!(store.add_item(&p, 2).is_applied());
        assert_eq!(store.totals().item_count, 2);
        assert!(matches!(store.flush(), Err(StoreError::Io(_))));
    }

    #[test]
    fn test_reopen_from_file_restores_cart() {
        let dir = TempDir::new().unwrap();
        let p = product(1, 99_999, 10);
        let q = product(9, 1_499, 100);

        {
            let mut store = CartStore::open(FileStore::new(dir.path()));
            store.add_item(&p, 2);
            store.add_item(&q, 3);
        }

        let store = CartStore::open(FileStore::new(dir.path()));
        let ids: Vec<u32> = store.cart().lines().iter().map(|l| l.id.get()).collect();
        assert_eq!(ids, vec![1, 9]);
        assert_eq!(store.totals().total_price, Money::from_cents(99_999 * 2 + 1_499 * 3));
    }

    #[test]
    fn test_custom_key_and_clear() {
        let mut store = CartStore::open_with_key(MemoryStore::new(), "guest-cart");
        store.add_item(&product(1, 100, 3), 1);
        assert!(store.storage().get("guest-cart").unwrap().is_some());
        assert_eq!(store.storage().get("cart").unwrap(), None);

        assert_eq!(store.clear(), CartOutcome::Applied);
        assert_eq!(store.storage().get("guest-cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.clear(), CartOutcome::Unchanged);
    }
}
