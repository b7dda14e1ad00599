//! Session command handlers.

mod authenticate;

pub use authenticate::{
    AuthenticateCommand, AuthenticateError, AuthenticateHandler, DEFAULT_AUTH_FAILURE,
    NETWORK_FAILURE,
};
