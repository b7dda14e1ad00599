//! Backend Adapters
//!
//! Implementations of the backend ports.
//!
//! - **HttpBackend** - Talks to the PRISM REST API with `reqwest`
//! - **MockBackend** - Scripted responses with call recording (testing)

mod http_backend;
mod mock_backend;
mod wire;

pub use http_backend::{HttpBackend, HttpBackendConfig};
pub use mock_backend::{BackendCall, MockBackend};
