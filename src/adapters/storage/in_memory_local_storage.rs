//! In-Memory Local Storage Adapter
//!
//! Keeps entries in a map. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{LocalStorage, StorageError};

/// In-memory storage for local entries
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocalStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryLocalStorage {
    /// Create an empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-seeded with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Copy of all entries
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().await.clone()
    }

    /// Get the number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl LocalStorage for InMemoryLocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_items(&self, items: &[(&str, String)]) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        for (key, value) in items {
            entries.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    async fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_entries_are_readable() {
        let storage = InMemoryLocalStorage::with_entries([("k", "v")]);
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let storage = InMemoryLocalStorage::new();
        let clone = storage.clone();

        storage.set_items(&[("k", "v".to_string())]).await.unwrap();
        assert_eq!(clone.get_item("k").await.unwrap().as_deref(), Some("v"));

        clone.remove_items(&["k", "missing"]).await.unwrap();
        assert!(storage.is_empty().await);
    }
}
