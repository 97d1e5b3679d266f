//! # Catalog Error Types
//!
//! Error types for catalog loading.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  RequestFailed  │  │  DecodeFailed           │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │                         │ │
//! │  │                 │  │  Status         │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Only configuration errors reach the caller of `new()`. Everything     │
//! │  else is absorbed by `load()`, which falls back to the static catalog. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid catalog configuration.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Endpoint is not an http(s) URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Request could not be sent or the connection dropped.
    #[error("Catalog request failed: {0}")]
    RequestFailed(String),

    /// No response within the configured timeout.
    #[error("Catalog request timed out after {0} seconds")]
    Timeout(u64),

    /// Endpoint answered with a non-success status.
    #[error("Catalog endpoint returned HTTP {status}")]
    Status { status: u16, body: String },

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// Body was not a `{ "products": [...] }` document.
    #[error("Failed to decode catalog: {0}")]
    DecodeFailed(String),
}

impl CatalogError {
    /// Returns true for errors raised before any request is made.
    pub fn is_config_error(&self) -> bool {
        matches!(self, CatalogError::InvalidConfig(_) | CatalogError::InvalidUrl(_))
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}
