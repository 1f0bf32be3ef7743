//! Integration tests for the Elegance Wardrobe storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p elegance-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `page_loads` - State carried across page loads through the file store
//! - `checkout` - Checkout flow end to end
//! - `tabs` - Several pages sharing one store
//! - `stored_data` - Compatibility with values written by older pages
//!
//! Every test gets its own [`TestShop`]: a temporary data directory that
//! plays the role of the origin's `localStorage`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::path::Path;

use elegance_storefront::config::StorefrontConfig;
use elegance_storefront::page::PageController;
use elegance_storefront::storage::{FileStore, KeyValueStore, Storage, StorageError};
use tempfile::TempDir;

/// A throwaway storefront origin backed by a temporary directory.
pub struct TestShop {
    dir: TempDir,
    config: StorefrontConfig,
}

impl TestShop {
    /// Create an empty origin with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = StorefrontConfig {
            data_dir: dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        };
        Ok(Self { dir, config })
    }

    /// Use a different store name.
    #[must_use]
    pub fn with_store_name(mut self, name: &str) -> Self {
        self.config.store_name = name.to_string();
        self
    }

    /// Reject values larger than `bytes`.
    #[must_use]
    pub const fn with_quota(mut self, bytes: usize) -> Self {
        self.config.storage_quota = Some(bytes);
        self
    }

    /// Directory holding the stored values.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Raw access to the origin's storage.
    #[must_use]
    pub fn store(&self) -> FileStore {
        let store = FileStore::new(self.dir.path());
        match self.config.storage_quota {
            Some(quota) => store.with_quota(quota),
            None => store,
        }
    }

    /// Load a page (a fresh tab or a reload) over this origin.
    #[must_use]
    pub fn open_page(&self) -> PageController<FileStore> {
        PageController::load(self.config.clone(), Storage::new(self.store()))
    }

    /// Write raw text under `key`, as an older page version might have.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn seed(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        FileStore::new(self.dir.path()).write(key, raw)
    }

    /// Raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails.
    pub fn raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store().read(key)
    }
}
