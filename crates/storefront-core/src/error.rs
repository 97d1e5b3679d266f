//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-store errors  → StoreError   (persistence)                 │
//! │  storefront-catalog errors → CatalogError (fetch / decode)             │
//! │  storefront-cli errors    → CliError     (what the user sees)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock-violating cart mutations are NOT errors. They are reported as
//! [`CartOutcome::Rejected`](crate::cart::CartOutcome) and leave the cart
//! untouched.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not part of the catalog.
    ///
    /// ## When This Occurs
    /// - User asks for the detail view of an unknown id
    /// - User adds an id that the current catalog does not contain
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Unparsable input, e.g. `storefront show abc`.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value outside a fixed vocabulary, e.g. an unknown sort order.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
