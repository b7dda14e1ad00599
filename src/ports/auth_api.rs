//! AuthApi port - exchanging email/password for a session.

use async_trait::async_trait;
use std::fmt;

use super::ApiError;
use crate::domain::foundation::{Credential, LoginCredentials};
use crate::domain::session::Identity;

/// Which authentication endpoint to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    /// Path relative to the backend base URL.
    pub fn path(&self) -> &'static str {
        match self {
            AuthMode::Login => "/api/auth/login",
            AuthMode::Register => "/api/auth/register",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Login => f.write_str("login"),
            AuthMode::Register => f.write_str("register"),
        }
    }
}

/// Identity and credential issued by a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthGrant {
    pub identity: Identity,
    pub credential: Credential,
    pub token_type: Option<String>,
}

/// Port for the authentication endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &LoginCredentials,
    ) -> Result<AuthGrant, ApiError>;
}
