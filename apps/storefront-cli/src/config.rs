//! # Application Configuration
//!
//! Configuration management for the storefront CLI.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --offline, --data-dir                                              │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     STOREFRONT_CATALOG_URL=http://localhost:8080/products              │
//! │     STOREFRONT_OFFLINE=1                                               │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/ (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     dummyjson endpoint, 20 products, 300 ms debounce                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! offline = false
//!
//! [catalog]
//! endpoint = "https://dummyjson.com/products"
//! limit = 20
//! timeout_secs = 10
//!
//! [search]
//! debounce_ms = 300
//!
//! [storage]
//! data_dir = "/home/me/.local/share/storefront"
//! cart_key = "cart"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use storefront_catalog::CatalogConfig;
use storefront_core::CART_STORAGE_KEY;
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Default quiet period before a search is applied.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Sections
// =============================================================================

/// `[search]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Quiet period in milliseconds before search text is applied.
    pub debounce_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl SearchSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the cart file. Platform data dir when unset.
    pub data_dir: Option<PathBuf>,

    /// Slot name; the cart lives in `<data_dir>/<cart_key>.json`.
    pub cart_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: None,
            cart_key: CART_STORAGE_KEY.to_string(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Skip the network and use the built-in catalog.
    #[serde(default)]
    pub offline: bool,

    /// Remote catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Search behavior.
    #[serde(default)]
    pub search: SearchSettings,

    /// Cart persistence.
    #[serde(default)]
    pub storage: StorageSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::config("No config path available"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        self.catalog.validate()?;

        if self.storage.cart_key.is_empty() {
            return Err(CliError::config("storage.cart_key must not be empty"));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("STOREFRONT_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog endpoint from environment");
            self.catalog.endpoint = url;
        }

        if let Some(limit) = lookup("STOREFRONT_CATALOG_LIMIT") {
            match limit.parse::<usize>() {
                Ok(l) => self.catalog.limit = l,
                Err(_) => warn!(limit = %limit, "Ignoring non-numeric STOREFRONT_CATALOG_LIMIT"),
            }
        }

        if let Some(ms) = lookup("STOREFRONT_DEBOUNCE_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.search.debounce_ms = ms,
                Err(_) => warn!(debounce_ms = %ms, "Ignoring non-numeric STOREFRONT_DEBOUNCE_MS"),
            }
        }

        if let Some(dir) = lookup("STOREFRONT_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(offline) = lookup("STOREFRONT_OFFLINE") {
            match offline.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.offline = true,
                "0" | "false" | "no" | "off" | "" => self.offline = false,
                _ => warn!(offline = %offline, "Unknown STOREFRONT_OFFLINE value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Directory for the cart file.
    pub fn data_dir(&self) -> CliResult<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => storefront_store::default_data_dir().ok_or_else(|| {
                CliError::config("Could not determine a data directory; set storage.data_dir")
            }),
        }
    }
}
