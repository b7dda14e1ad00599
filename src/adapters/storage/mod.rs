//! Storage Adapters
//!
//! Implementations of the LocalStorage port holding the durable session copy.
//!
//! ## Available Adapters
//!
//! - **FileLocalStorage** - Stores entries in one JSON file on disk
//! - **InMemoryLocalStorage** - Stores entries in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileLocalStorage, InMemoryLocalStorage};
//!
//! // Production: file-based storage
//! let storage = FileLocalStorage::new("./data/local_storage.json");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryLocalStorage::new();
//! ```

mod file_local_storage;
mod in_memory_local_storage;

pub use file_local_storage::FileLocalStorage;
pub use in_memory_local_storage::InMemoryLocalStorage;
