//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the client to external systems:
//! - `backend` - PRISM REST API client and a scripted mock
//! - `storage` - Local storage for the durable session copy

pub mod backend;
pub mod storage;

pub use backend::{BackendCall, HttpBackend, HttpBackendConfig, MockBackend};
pub use storage::{FileLocalStorage, InMemoryLocalStorage};
