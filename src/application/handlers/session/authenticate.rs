//! Authenticate - Command handler for login and registration.

use std::sync::Arc;
use thiserror::Error;

use crate::application::session_store::{SessionStore, SessionStoreError};
use crate::domain::foundation::{LoginCredentials, ValidationError};
use crate::domain::session::SessionSnapshot;
use crate::ports::{ApiError, AuthApi, AuthMode};

/// Shown when the backend rejects without a `detail`.
pub const DEFAULT_AUTH_FAILURE: &str = "Authentication failed";

/// Shown when the backend cannot be reached.
pub const NETWORK_FAILURE: &str = "Network error. Is the backend running?";

/// Command to exchange email/password for a session.
#[derive(Debug, Clone)]
pub struct AuthenticateCommand {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
}

/// Errors from the authentication flow.
#[derive(Debug, Error)]
pub enum AuthenticateError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Backend refused; carries its `detail` or the default message.
    #[error("{0}")]
    Rejected(String),

    #[error("{}", NETWORK_FAILURE)]
    Network,

    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

/// Handler for login and registration.
pub struct AuthenticateHandler {
    api: Arc<dyn AuthApi>,
    store: Arc<SessionStore>,
}

impl AuthenticateHandler {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<SessionStore>) -> Self {
        Self { api, store }
    }

    pub async fn handle(
        &self,
        cmd: AuthenticateCommand,
    ) -> Result<SessionSnapshot, AuthenticateError> {
        // 1. Required fields, before any request
        let credentials = LoginCredentials::new(cmd.email, cmd.password)?;

        // 2. Exchange
        tracing::debug!(mode = %cmd.mode, email = credentials.email(), "Authenticating");
        let grant = self
            .api
            .authenticate(cmd.mode, &credentials)
            .await
            .map_err(|e| {
                tracing::warn!(mode = %cmd.mode, error = %e, "Authentication failed");
                classify(e)
            })?;

        // 3. Hand the new session to the store
        let snapshot = self.store.login(grant.identity, grant.credential).await?;
        Ok(snapshot)
    }
}

fn classify(error: ApiError) -> AuthenticateError {
    if error.is_connectivity() {
        return AuthenticateError::Network;
    }
    AuthenticateError::Rejected(
        error
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_AUTH_FAILURE.to_string()),
    )
}
