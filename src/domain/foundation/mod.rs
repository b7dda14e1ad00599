//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the Prism client.

mod auth;
mod errors;
mod ids;
mod lenient;
mod state_machine;
mod timestamp;

pub use auth::{Credential, LoginCredentials};
pub use errors::ValidationError;
pub use ids::UserId;
pub use lenient::null_as_default;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
