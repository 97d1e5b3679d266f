//! # storefront-catalog: Product Catalog Loading
//!
//! Produces the read-only [`Catalog`](storefront_core::Catalog) for a session,
//! either from a remote HTTP endpoint or from the built-in fallback list.
//!
//! ## Module Organization
//!
//! - [`source`] - `CatalogSource` contract, remote and static sources
//! - [`upstream`] - Upstream wire format and field normalization
//! - [`config`] - `[catalog]` configuration section
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_catalog::{CatalogConfig, CatalogSource, RemoteCatalogSource};
//!
//! let source = RemoteCatalogSource::new(CatalogConfig::default())?;
//! let load = source.load().await;
//! println!("{} products ({})", load.catalog.len(), load.origin);
//! ```

pub mod config;
pub mod error;
pub mod source;
pub mod upstream;

pub use config::{CatalogConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
pub use error::{CatalogError, CatalogResult};
pub use source::{CatalogLoad, CatalogOrigin, CatalogSource, RemoteCatalogSource, StaticCatalogSource};
