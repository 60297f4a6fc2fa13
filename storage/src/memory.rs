//! In-memory storage backend.

use campus_connect_core::storage::{StorageClient, StorageFuture};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory [`StorageClient`] backed by a `HashMap`.
///
/// Values do not survive the process; use it for tests, demos, and as the
/// reference implementation of the storage contract.
#[derive(Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

impl StorageClient for MemoryStorage {
    fn get_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move { Ok(self.items.read().await.get(key).cloned()) })
    }

    fn set_item<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            self.items.write().await.insert(key.to_string(), value);
            Ok(())
        })
    }

    fn remove_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            self.items.write().await.remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_of_missing_key_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "v".to_string()).await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn set_replaces_prior_value() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "old".to_string()).await.unwrap();
        storage.set_item("k", "new".to_string()).await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("new"));
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_absence() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "v".to_string()).await.unwrap();
        storage.remove_item("k").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), None);
        // Removing again is a no-op.
        storage.remove_item("k").await.unwrap();
        assert!(storage.is_empty().await);
    }
}
