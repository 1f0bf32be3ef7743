//! Durable key/value storage.
//!
//! Values are stored as JSON text under string keys. The backend is whatever
//! durable medium the page has:
//!
//! - [`MemoryStore`] - process-local, shared between clones (tests, previews)
//! - [`FileStore`] - one JSON file per key in a directory (CLI)
//! - `BrowserStore` - the origin's `localStorage` (`web` feature)
//!
//! [`Storage`] wraps a backend with the page's contract: reads never fail
//! (a missing, empty, unreadable or undecodable value yields the caller's
//! fallback, reported as [`Lookup::Fallback`]) and writes are best-effort.
//!
//! # Keys
//!
//! See [`keys`] for the two keys the storefront persists.

#[cfg(feature = "web")]
pub mod browser;
pub mod file;
pub mod memory;

#[cfg(feature = "web")]
pub use browser::BrowserStore;
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys shared by every page.
pub mod keys {
    /// Key for the color theme (`"light"` or `"dark"`).
    pub const THEME: &str = "theme";

    /// Key for the cart line items.
    pub const CART: &str = "cart";
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage medium cannot be reached (disabled, missing, poisoned).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The value is larger than the backend accepts.
    #[error("storage quota exceeded writing {key} ({size} bytes, limit {limit})")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Size of the rejected value in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The medium refused the write for another reason.
    #[error("storage rejected write: {0}")]
    Rejected(String),

    /// Filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The value could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A durable string-to-string medium.
///
/// Implementations are cheap handles; cloning one must address the same
/// medium, the way two tabs of one origin share `localStorage`.
pub trait KeyValueStore {
    /// Read the raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store raw text under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium is unavailable or refuses the value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Where a value returned by [`Storage::get`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// Decoded from the stored value.
    Stored(T),
    /// The caller's fallback; nothing usable was stored.
    Fallback(T),
}

impl<T> Lookup<T> {
    /// Returns `true` if the value was read from storage.
    #[must_use]
    pub const fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }

    /// Returns the value regardless of origin.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Stored(value) | Self::Fallback(value) => value,
        }
    }
}

/// JSON view over a [`KeyValueStore`] with fallback reads.
#[derive(Debug, Clone, Default)]
pub struct Storage<S> {
    backend: S,
}

impl<S: KeyValueStore> Storage<S> {
    /// Wrap a backend.
    #[must_use]
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Read and decode `key`, or return `fallback`.
    ///
    /// Never fails: an absent key, empty text, an unavailable medium and
    /// undecodable JSON all produce [`Lookup::Fallback`].
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> Lookup<T> {
        self.get_or_else(key, || fallback)
    }

    /// Like [`Storage::get`], building the fallback only when needed.
    pub fn get_or_else<T, F>(&self, key: &str, fallback: F) -> Lookup<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.backend.read(key) {
            Ok(Some(raw)) if !raw.is_empty() => match serde_json::from_str(&raw) {
                Ok(value) => Lookup::Stored(value),
                Err(e) => {
                    tracing::debug!(key, error = %e, "Stored value is unreadable, using fallback");
                    Lookup::Fallback(fallback())
                }
            },
            Ok(_) => Lookup::Fallback(fallback()),
            Err(e) => {
                tracing::debug!(key, error = %e, "Storage read failed, using fallback");
                Lookup::Fallback(fallback())
            }
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding fails or the backend refuses the write.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.write(key, &raw)
    }

    /// Store `value` without surfacing failure.
    ///
    /// Returns `true` if the value was written. Failures are logged and
    /// otherwise dropped; there is no retry.
    pub fn set_best_effort<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to persist value");
                false
            }
        }
    }
}
