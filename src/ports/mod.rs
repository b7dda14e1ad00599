//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application layer and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `LocalStorage` - Durable string entries holding the session copy
//!
//! ## Backend Ports
//!
//! - `AuthApi` - Login and registration
//! - `DecisionApi` - Decision analysis and history
//! - `ResearchApi` - Chart vision analysis
//! - `PaymentApi` - Subscription payments

mod api_error;
mod auth_api;
mod decision_api;
mod local_storage;
mod payment_api;
mod research_api;

pub use api_error::ApiError;
pub use auth_api::{AuthApi, AuthGrant, AuthMode};
pub use decision_api::{DecisionApi, HistoryPayload};
pub use local_storage::{LocalStorage, StorageError};
pub use payment_api::PaymentApi;
pub use research_api::ResearchApi;
