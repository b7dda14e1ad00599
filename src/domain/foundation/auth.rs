//! Bearer credential value object.
//!
//! The credential is an opaque token issued by the backend at login or
//! registration. The client never inspects it; it only stores it and presents
//! it on requests.
//!
//! # Design Decisions
//!
//! - Wrapped in `secrecy::Secret` so it never lands in `Debug` output or logs
//! - Construction rejects empty/blank tokens: an empty token must never make a
//!   session look authenticated

use secrecy::{ExposeSecret, Secret};
use std::fmt;

use super::ValidationError;

/// Opaque bearer token authorizing requests on behalf of an identity.
#[derive(Clone)]
pub struct Credential(Secret<String>);

impl Credential {
    /// Creates a credential from a raw token string.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ValidationError::empty_field("access_token"));
        }
        Ok(Self(Secret::new(token)))
    }

    /// Exposes the raw token (for request headers and durable storage only).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Credential {}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Email and password typed into the sign-in form.
#[derive(Clone)]
pub struct LoginCredentials {
    email: String,
    password: Secret<String>,
}

impl LoginCredentials {
    /// Validates required fields before anything is sent.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing '@'"));
        }
        let password = password.into();
        if password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        Ok(Self {
            email,
            password: Secret::new(password),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_rejects_blank_token() {
        assert!(Credential::new("").is_err());
        assert!(Credential::new("   ").is_err());
    }

    #[test]
    fn credential_exposes_raw_token() {
        let credential = Credential::new("tok").unwrap();
        assert_eq!(credential.expose(), "tok");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("super-secret").unwrap();
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn credentials_compare_by_token() {
        assert_eq!(Credential::new("a").unwrap(), Credential::new("a").unwrap());
        assert_ne!(Credential::new("a").unwrap(), Credential::new("b").unwrap());
    }

    #[test]
    fn login_credentials_trim_email() {
        let creds = LoginCredentials::new("  a@b.io ", "pw").unwrap();
        assert_eq!(creds.email(), "a@b.io");
        assert_eq!(creds.expose_password(), "pw");
    }

    #[test]
    fn login_credentials_require_fields() {
        assert_eq!(
            LoginCredentials::new("", "pw").unwrap_err(),
            ValidationError::empty_field("email")
        );
        assert_eq!(
            LoginCredentials::new("a@b.io", "").unwrap_err(),
            ValidationError::empty_field("password")
        );
        assert_eq!(LoginCredentials::new("nope", "pw").unwrap_err().field(), "email");
    }

    #[test]
    fn login_credentials_debug_hides_password() {
        let creds = LoginCredentials::new("a@b.io", "hunter2").unwrap();
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
