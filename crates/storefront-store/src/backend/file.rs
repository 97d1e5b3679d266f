//! # File Backend
//!
//! Each key is one JSON file under a data directory.
//!
//! ## Write Path
//! ```text
//! put("cart", json)
//!     │
//!     ├── create_dir_all(<data_dir>)
//!     ├── write <data_dir>/cart.json.tmp
//!     └── rename → <data_dir>/cart.json     (atomic replace on one filesystem)
//! ```
//!
//! ## Platform-Specific Default Directory
//! - **macOS**: `~/Library/Application Support/com.storefront.storefront/`
//! - **Windows**: `%APPDATA%\storefront\storefront\data\`
//! - **Linux**: `~/.local/share/storefront/`

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};

/// Durable store writing one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(?path, bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Platform data directory for the storefront.
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "storefront", "storefront").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Keys become file names: ASCII letters, digits, `-` and `_` only.
fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
