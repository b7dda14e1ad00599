//! LocalStorage port - durable string key/value entries.
//!
//! Modeled on browser local storage: string keys, string values. Batch
//! operations let the session store write or clear both of its entries in
//! one call so an adapter can commit them together.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during local storage operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Underlying read or write failed
    #[error("IO error: {0}")]
    Io(String),

    /// The backing file exists but is not a JSON object of strings
    #[error("storage file is corrupt: {0}")]
    Corrupt(String),
}

/// Durable string key/value storage
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// Read one entry; `None` when absent.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write several entries at once.
    async fn set_items(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    /// Remove several entries at once. Missing keys are not an error.
    async fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError>;
}
