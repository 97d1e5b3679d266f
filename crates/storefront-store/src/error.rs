//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore logs it (warn on read, error on write) and carries on       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  flush() hands it to callers that need the write result                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    /// - Rename across filesystems
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded.
    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key cannot be used as a slot name.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// No platform data directory could be determined.
    #[error("Could not determine a data directory")]
    NoDataDir,
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;
