//! In-process storage backend.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{KeyValueStore, StorageError};

/// Storage held in process memory.
///
/// Clones share the same entries, so two page controllers built from clones
/// of one `MemoryStore` behave like two tabs of the same origin.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
    unavailable: bool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every operation fails, like disabled storage.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Reject values larger than `bytes`, like a full browser quota.
    #[must_use]
    pub const fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Whether nothing has been written yet (test helper).
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.read().map_or(true, |entries| entries.is_empty())
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("storage is disabled".to_string()));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("storage lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        if let Some(limit) = self.quota
            && value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                size: value.len(),
                limit,
            });
        }

        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        assert_eq!(store.read("theme").unwrap(), None);

        store.write("theme", "\"dark\"").unwrap();
        assert_eq!(store.read("theme").unwrap().as_deref(), Some("\"dark\""));

        store.write("theme", "\"light\"").unwrap();
        assert_eq!(store.read("theme").unwrap().as_deref(), Some("\"light\""));
    }

    #[test]
    fn test_clones_share_entries() {
        let first = MemoryStore::new();
        let second = first.clone();

        first.write("cart", "[]").unwrap();
        assert_eq!(second.read("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_unavailable_rejects_everything() {
        let store = MemoryStore::unavailable();
        assert!(matches!(
            store.read("cart"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            store.write("cart", "[]"),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn test_quota_rejects_large_values_and_keeps_old() {
        let store = MemoryStore::new().with_quota(4);
        store.write("cart", "[]").unwrap();

        let err = store.write("cart", "[1,2,3]").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded { size: 7, limit: 4, .. }
        ));
        assert_eq!(store.read("cart").unwrap().as_deref(), Some("[]"));
    }
}
