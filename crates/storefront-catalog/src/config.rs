//! # Catalog Configuration
//!
//! The `[catalog]` section of `storefront.toml`.
//!
//! ```toml
//! [catalog]
//! endpoint = "https://dummyjson.com/products"
//! limit = 20
//! timeout_secs = 10
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_core::CATALOG_LIMIT;
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Default remote catalog endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://dummyjson.com/products";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Remote catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// URL answering GET with `{ "products": [...] }`.
    pub endpoint: String,

    /// Number of upstream records to keep.
    pub limit: usize,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            limit: CATALOG_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CatalogConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parses and checks the endpoint, limit and timeout.
    pub fn validate(&self) -> CatalogResult<Url> {
        let url = Url::parse(&self.endpoint)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CatalogError::InvalidUrl(format!(
                "Catalog endpoint must start with http:// or https://, got: {}",
                self.endpoint
            )));
        }

        if self.limit == 0 {
            return Err(CatalogError::InvalidConfig(
                "limit must be greater than 0".into(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(url)
    }
}
