//! Session value types.
//!
//! A session pairs an identity with a credential. The pairing is only
//! considered authenticated when a credential is present, and an identity is
//! never exposed without one.

use crate::domain::foundation::Credential;

use super::Identity;

/// Identity x credential pairing held by the client.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    identity: Option<Identity>,
    credential: Option<Credential>,
}

impl Session {
    /// An empty (logged out) session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An authenticated session.
    pub fn new(identity: Identity, credential: Credential) -> Self {
        Self {
            identity: Some(identity),
            credential: Some(credential),
        }
    }

    /// True iff a credential is present. Derived on every call.
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// The identity, only while a credential backs it.
    pub fn identity(&self) -> Option<&Identity> {
        self.credential.as_ref().and(self.identity.as_ref())
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}

/// Whether the store has finished rehydrating from durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Rehydration has not committed yet; no gating decision may be made.
    Loading,
    /// In-memory session reflects durable storage.
    Ready,
}

/// Read-only view of the store published to observers after every commit.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub identity: Option<Identity>,
    pub authenticated: bool,
    /// Advances whenever the credential changes (login as someone else, logout).
    pub epoch: u64,
}

impl SessionSnapshot {
    pub fn loading() -> Self {
        Self {
            phase: SessionPhase::Loading,
            identity: None,
            authenticated: false,
            epoch: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }
}

/// Credential captured when a request is issued.
///
/// A response is applied to the store only if the ticket's epoch is still the
/// current one; anything else is a late response for a session that no longer
/// exists.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTicket {
    pub epoch: u64,
    pub credential: Credential,
    pub identity: Identity,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential::new("tok").unwrap()
    }

    #[test]
    fn empty_session_is_not_authenticated() {
        let session = Session::empty();
        assert!(!session.is_authenticated());
        assert!(session.identity().is_none());
    }

    #[test]
    fn session_with_credential_is_authenticated() {
        let session = Session::new(Identity::default(), credential());
        assert!(session.is_authenticated());
        assert!(session.identity().is_some());
        assert_eq!(session.credential().map(|c| c.expose()), Some("tok"));
    }

    #[test]
    fn loading_snapshot_is_not_ready() {
        let snapshot = SessionSnapshot::loading();
        assert!(!snapshot.is_ready());
        assert!(!snapshot.authenticated);
    }
}
