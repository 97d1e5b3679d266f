//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart rules
//! and the product filtering pipeline as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front end (storefront-cli)                      │   │
//! │  │    Product grid ──► Filters ──► Detail view ──► Cart panel      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        storefront-store / storefront-catalog                    │   │
//! │  │    CartStore (persisted)        CatalogSource (HTTP/fallback)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  filter   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ Criteria  │  │   │
//! │  │   │ ProductId │  │  decimal  │  │ CartLine  │  │  apply()  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO TIMERS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart lines, stock-bounded mutations, totals
//! - [`filter`] - Search / category / price-sort pipeline
//! - [`catalog`] - Read-only catalog and the fallback product list
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, CartOutcome, Money, Product, ProductId};
//!
//! let product = Product::new(ProductId::new(1), "Laptop", "electronics", Money::from_cents(1000), 2);
//!
//! let mut cart = Cart::new();
//! assert_eq!(cart.add_item(&product, 1), CartOutcome::Applied);
//! assert_eq!(cart.add_item(&product, 1), CartOutcome::Applied);
//!
//! // A third unit would exceed stock: the cart is left unchanged
//! assert!(cart.add_item(&product, 1).is_rejected());
//! assert_eq!(cart.total_item_count(), 2);
//! assert_eq!(cart.total_price(), Money::from_cents(2000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartOutcome, CartTotals, RejectReason};
pub use catalog::{fallback_catalog, Catalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{apply, categories, category_label, FilterCriteria, SortOrder};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key under which the cart snapshot is persisted.
pub const CART_STORAGE_KEY: &str = "cart";

/// Number of upstream records consumed when building a catalog.
pub const CATALOG_LIMIT: usize = 20;
