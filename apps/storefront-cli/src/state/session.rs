//! # Session
//!
//! Everything a command needs: the loaded catalog, the listing and the cart.

use std::sync::Arc;

use storefront_catalog::{CatalogLoad, CatalogOrigin};
use storefront_core::Catalog;
use storefront_store::{CartStore, KeyValueStore};
use tracing::info;

use super::ListingState;

/// Live state of one CLI invocation or shell session.
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    pub listing: ListingState,
    pub store: CartStore<S>,
    origin: CatalogOrigin,
}

impl<S: KeyValueStore> Session<S> {
    /// Wires a freshly loaded catalog into the listing and the cart store.
    pub fn new(load: CatalogLoad, mut store: CartStore<S>) -> Self {
        let catalog = Arc::new(load.catalog);
        store.attach_catalog(Arc::clone(&catalog));

        info!(
            origin = %load.origin,
            products = catalog.len(),
            cart_lines = store.cart().line_count(),
            "Session ready"
        );

        Session {
            listing: ListingState::new(catalog),
            store,
            origin: load.origin,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.listing.catalog()
    }

    /// Whether the catalog came from the network or the built-in list.
    pub fn origin(&self) -> CatalogOrigin {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Money, Product, ProductId};
    use storefront_store::MemoryStore;

    #[test]
    fn test_catalog_bounds_cart_updates() {
        let mut session = Session::new(CatalogLoad::fallback(), CartStore::open(MemoryStore::new()));
        assert_eq!(session.origin(), CatalogOrigin::Fallback);

        // A stale copy with more stock than the catalog allows.
        let stale = Product::new(ProductId::new(19), "Camera", "electronics", Money::from_cents(59_999), 50);
        assert!(session.store.add_item(&stale, 6).is_rejected());
        assert!(session.store.add_item(&stale, 5).is_applied());
        assert!(session.store.update_quantity(ProductId::new(19), 6).is_rejected());

        assert!(std::ptr::eq(session.catalog(), session.store.catalog().unwrap()));
    }
}
