//! In-memory storage backend using DashMap

use dashmap::DashMap;

use super::StorageBackend;
use crate::error::StorageError;

/// An in-memory key/value store backed by a concurrent hash map.
///
/// Data is lost when the process exits. Useful for tests and for sharing
/// state between views within one run.
///
/// # Example
///
/// ```
/// use listkit::storage::{MemoryStorage, StorageBackend};
///
/// let storage = MemoryStorage::new();
/// storage.set_item("k", "{}").unwrap();
/// assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("{}"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
    store: DashMap<String, String>,
}

impl MemoryStorage {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove(key);
        Ok(())
    }
}
