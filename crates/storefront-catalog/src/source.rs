//! # Catalog Sources
//!
//! Where the session's product list comes from.
//!
//! ## Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    RemoteCatalogSource::load()                          │
//! │                                                                         │
//! │  GET <endpoint> ──► status 2xx? ──► decode { products } ──► normalize  │
//! │        │                 │                  │                  │        │
//! │        │ network error   │ non-2xx          │ bad body         │        │
//! │        ▼                 ▼                  ▼                  ▼        │
//! │  ┌───────────────────────────────────┐   CatalogLoad {                 │
//! │  │ warn! + fallback_catalog()        │     origin: Remote,             │
//! │  │ CatalogLoad { origin: Fallback }  │     catalog, fetched_at }       │
//! │  └───────────────────────────────────┘                                 │
//! │                                                                         │
//! │  load() never fails. try_fetch() returns the typed error instead.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::future::Future;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use storefront_core::{fallback_catalog, Catalog};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::upstream::UpstreamResponse;

// =============================================================================
// Load Result
// =============================================================================

/// Which path produced the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    Remote,
    Fallback,
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogOrigin::Remote => write!(f, "remote"),
            CatalogOrigin::Fallback => write!(f, "fallback"),
        }
    }
}

/// A loaded catalog and where it came from.
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub origin: CatalogOrigin,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogLoad {
    pub fn remote(catalog: Catalog) -> Self {
        CatalogLoad {
            catalog,
            origin: CatalogOrigin::Remote,
            fetched_at: Utc::now(),
        }
    }

    pub fn fallback() -> Self {
        CatalogLoad {
            catalog: fallback_catalog(),
            origin: CatalogOrigin::Fallback,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == CatalogOrigin::Fallback
    }
}

// =============================================================================
// Source Contract
// =============================================================================

/// Produces the catalog for a session.
///
/// Implementations always yield a catalog; failures are handled inside.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> impl Future<Output = CatalogLoad> + Send;
}

// =============================================================================
// Remote Source
// =============================================================================

/// Fetches the catalog over HTTP and falls back to the static list on failure.
#[derive(Debug, Clone)]
pub struct RemoteCatalogSource {
    client: Client,
    endpoint: Url,
    config: CatalogConfig,
}

impl RemoteCatalogSource {
    /// Validates `config` and builds the HTTP client.
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let endpoint = config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CatalogError::InvalidConfig(e.to_string()))?;

        Ok(RemoteCatalogSource {
            client,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Fetches and normalizes the catalog without falling back.
    pub async fn try_fetch(&self) -> CatalogResult<Catalog> {
        debug!(endpoint = %self.endpoint, "Fetching catalog");

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let document: UpstreamResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::DecodeFailed(e.to_string()))?;

        let upstream_count = document.products.len();
        let products = document.into_products(self.config.limit);
        debug!(upstream_count, kept = products.len(), "Catalog normalized");

        Ok(Catalog::new(products))
    }

    fn transport_error(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout(self.config.timeout_secs)
        } else {
            CatalogError::RequestFailed(err.to_string())
        }
    }
}

impl CatalogSource for RemoteCatalogSource {
    async fn load(&self) -> CatalogLoad {
        match self.try_fetch().await {
            Ok(catalog) => {
                info!(products = catalog.len(), endpoint = %self.endpoint, "Catalog loaded");
                CatalogLoad::remote(catalog)
            }
            Err(e) => {
                warn!(error = %e, endpoint = %self.endpoint, "Catalog fetch failed, using fallback catalog");
                CatalogLoad::fallback()
            }
        }
    }
}

// =============================================================================
// Static Source
// =============================================================================

/// Always yields the fallback catalog. Used in offline mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalogSource;

impl CatalogSource for StaticCatalogSource {
    async fn load(&self) -> CatalogLoad {
        debug!("Using static catalog");
        CatalogLoad::fallback()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use storefront_core::ProductId;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn source_for(server: &MockServer) -> RemoteCatalogSource {
        let config = CatalogConfig::default().with_endpoint(format!("{}/products", server.uri()));
        RemoteCatalogSource::new(config).unwrap()
    }

    fn upstream_products(count: u32) -> serde_json::Value {
        let products: Vec<_> = (1..=count)
            .map(|id| {
                json!({
                    "id": id,
                    "title": format!("Item {}", id),
                    "price": 10.5,
                    "category": "groceries",
                    "stock": id,
                    "thumbnail": format!("https://cdn.example.com/{}.webp", id)
                })
            })
            .collect();
        json!({ "products": products, "total": count, "skip": 0, "limit": count })
    }

    #[tokio::test]
    async fn test_remote_load_normalizes_and_limits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream_products(30)))
            .mount(&server)
            .await;

        let load = source_for(&server).await.load().await;

        assert_eq!(load.origin, CatalogOrigin::Remote);
        assert_eq!(load.catalog.len(), 20);
        let first = load.catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(first.name, "Item 1");
        assert_eq!(first.price.cents(), 1050);
        assert_eq!(first.image.as_deref(), Some("https://cdn.example.com/1.webp"));
        assert!(load.catalog.get(ProductId::new(21)).is_none());
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        assert!(matches!(
            source.try_fetch().await,
            Err(CatalogError::Status { status: 500, .. })
        ));

        let load = source.load().await;
        assert!(load.is_fallback());
        assert_eq!(load.catalog, fallback_catalog());
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        assert!(matches!(source.try_fetch().await, Err(CatalogError::DecodeFailed(_))));
        assert!(source.load().await.is_fallback());
    }

    #[tokio::test]
    async fn test_empty_product_list_is_remote() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
            .mount(&server)
            .await;

        let load = source_for(&server).await.load().await;
        assert_eq!(load.origin, CatalogOrigin::Remote);
        assert!(load.catalog.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(upstream_products(3))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = CatalogConfig::default()
            .with_endpoint(format!("{}/products", server.uri()))
            .with_timeout_secs(1);
        let source = RemoteCatalogSource::new(config).unwrap();

        assert!(matches!(source.try_fetch().await, Err(CatalogError::Timeout(1))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back() {
        let config = CatalogConfig::default().with_endpoint("http://127.0.0.1:9/products");
        let source = RemoteCatalogSource::new(config).unwrap();

        let load = source.load().await;
        assert!(load.is_fallback());
        assert_eq!(load.catalog.len(), 20);
    }

    #[tokio::test]
    async fn test_static_source() {
        let load = StaticCatalogSource.load().await;
        assert_eq!(load.origin, CatalogOrigin::Fallback);
        assert_eq!(load.catalog.len(), 20);
        assert_eq!(load.origin.to_string(), "fallback");
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let config = CatalogConfig::default().with_endpoint("ws://example.com");
        assert!(matches!(
            RemoteCatalogSource::new(config),
            Err(CatalogError::InvalidUrl(_))
        ));
    }
}
