//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront CLI                     │
//! │                                                                         │
//! │  storefront show 99                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  CliResult<T>                                                    │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown id? ──── CoreError::ProductNotFound ─────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Bad config? ──── CatalogError::InvalidUrl ───── CliError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr:  error: Product not found: 99                                 │
//! │  --json:  { "code": "NOT_FOUND", "message": "Product not found: 99" }  │
//! │  exit:    ErrorCode::exit_code()                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected cart mutations are not errors. They are reported in the command
//! output with status `rejected` and exit 0.

use serde::Serialize;
use storefront_catalog::CatalogError;
use storefront_core::{CoreError, ValidationError};
use storefront_store::StoreError;
use thiserror::Error;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 99"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// Bad user input (id, quantity, sort order)
    ValidationError,

    /// Configuration file or environment is invalid
    ConfigError,

    /// Cart could not be read or written
    StorageError,

    /// Catalog source could not be set up
    CatalogError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::ConfigError => 4,
            ErrorCode::StorageError => 5,
            ErrorCode::CatalogError => 6,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => {
                CliError::new(ErrorCode::NotFound, format!("Product not found: {}", id))
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

/// Converts persistence errors to CLI errors.
impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidKey(key) => {
                CliError::config(format!("Invalid cart_key '{}': use letters, digits, '-' or '_'", key))
            }
            StoreError::NoDataDir => {
                CliError::config("Could not determine a data directory; set storage.data_dir")
            }
            other => {
                tracing::error!(error = %other, "Storage failure");
                CliError::new(ErrorCode::StorageError, other.to_string())
            }
        }
    }
}

/// Converts catalog errors to CLI errors.
impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        if err.is_config_error() {
            CliError::config(err.to_string())
        } else {
            CliError::new(ErrorCode::CatalogError, err.to_string())
        }
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::config(format!("Invalid config file: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::internal(format!("Failed to encode config: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("Failed to encode output: {}", err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::internal(err.to_string())
    }
}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;
