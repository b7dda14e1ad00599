//! SessionStore - the single owner of the client session.
//!
//! Holds the in-memory identity/credential pair and its durable copy in
//! local storage (`prism_token` + `prism_user`). Every mutation holds one
//! async mutex across the durable write and the in-memory update, then
//! publishes a [`SessionSnapshot`] on a watch channel.
//!
//! # Epochs
//!
//! The epoch advances whenever the credential changes. Flows capture a
//! [`SessionTicket`] before calling the backend and apply the outcome through
//! [`SessionStore::update_identity`] or [`SessionStore::logout_if_current`],
//! which do nothing for a ticket from an earlier epoch.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{watch, Mutex};

use crate::domain::foundation::Credential;
use crate::domain::session::{Identity, Session, SessionPhase, SessionSnapshot, SessionTicket};
use crate::ports::{LocalStorage, StorageError};

/// Local storage key for the credential.
pub const TOKEN_KEY: &str = "prism_token";

/// Local storage key for the JSON-encoded identity.
pub const USER_KEY: &str = "prism_user";

/// Errors from session mutations.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to encode identity: {0}")]
    Encode(#[from] serde_json::Error),
}

struct StoreState {
    session: Session,
    phase: SessionPhase,
    epoch: u64,
}

impl StoreState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            identity: self.session.identity().cloned(),
            authenticated: self.session.is_authenticated(),
            epoch: self.epoch,
        }
    }
}

/// Session owner shared across the application via `Arc`.
pub struct SessionStore {
    storage: Arc<dyn LocalStorage>,
    state: Mutex<StoreState>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        let (snapshots, _) = watch::channel(SessionSnapshot::loading());
        Self {
            storage,
            state: Mutex::new(StoreState {
                session: Session::empty(),
                phase: SessionPhase::Loading,
                epoch: 0,
            }),
            snapshots,
        }
    }

    /// Rehydrates the session from local storage. Runs once; later calls
    /// return the current snapshot.
    ///
    /// Never fails: unreadable or malformed durable entries degrade to an
    /// empty session and are cleared.
    pub async fn initialize(&self) -> SessionSnapshot {
        let mut state = self.state.lock().await;
        if state.phase == SessionPhase::Ready {
            return state.snapshot();
        }

        let token = self.read_entry(TOKEN_KEY).await;
        let user = self.read_entry(USER_KEY).await;
        let had_entries = token.is_some() || user.is_some();

        state.session = match (token, user) {
            (Some(token), Some(user)) => match rehydrate(&token, &user) {
                Some(session) => session,
                None => {
                    tracing::warn!("Stored session is malformed; starting logged out");
                    Session::empty()
                }
            },
            (None, None) => Session::empty(),
            _ => {
                tracing::warn!("Stored session is incomplete; starting logged out");
                Session::empty()
            }
        };

        if had_entries && !state.session.is_authenticated() {
            if let Err(e) = self.storage.remove_items(&[TOKEN_KEY, USER_KEY]).await {
                tracing::error!(error = %e, "Failed to clear malformed stored session");
            }
        }

        state.phase = SessionPhase::Ready;
        tracing::debug!(
            authenticated = state.session.is_authenticated(),
            "Session store initialized"
        );
        self.publish(&state)
    }

    /// Replaces the session with `identity` and `credential`, durable copy
    /// first. Also used to refresh the identity under the same credential.
    pub async fn login(
        &self,
        identity: Identity,
        credential: Credential,
    ) -> Result<SessionSnapshot, SessionStoreError> {
        let mut state = self.state.lock().await;
        self.commit_login(&mut state, identity, credential).await
    }

    /// Clears the session in memory and in local storage. Idempotent.
    ///
    /// The in-memory session is cleared even when the durable removal fails;
    /// the error is still returned.
    pub async fn logout(&self) -> Result<SessionSnapshot, SessionStoreError> {
        let mut state = self.state.lock().await;
        self.commit_logout(&mut state).await
    }

    /// True iff a credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.snapshots.borrow().authenticated
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver for every committed snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Captures the current credential for an outgoing request.
    pub async fn ticket(&self) -> Option<SessionTicket> {
        let state = self.state.lock().await;
        let credential = state.session.credential()?.clone();
        let identity = state.session.identity().cloned().unwrap_or_default();
        Some(SessionTicket {
            epoch: state.epoch,
            credential,
            identity,
        })
    }

    /// True while the ticket's session is the current one.
    pub async fn is_current(&self, ticket: &SessionTicket) -> bool {
        is_current(&*self.state.lock().await, ticket)
    }

    /// Rewrites the identity of the ticket's session with `merge`, under the
    /// same credential. Returns false, without touching anything, when the
    /// ticket is stale.
    pub async fn update_identity<F>(
        &self,
        ticket: &SessionTicket,
        merge: F,
    ) -> Result<bool, SessionStoreError>
    where
        F: FnOnce(&Identity) -> Identity + Send,
    {
        let mut state = self.state.lock().await;
        if !is_current(&state, ticket) {
            tracing::debug!(
                ticket_epoch = ticket.epoch,
                current_epoch = state.epoch,
                "Discarding identity update for a previous session"
            );
            return Ok(false);
        }
        let current = state.session.identity().cloned().unwrap_or_default();
        let identity = merge(&current);
        self.commit_login(&mut state, identity, ticket.credential.clone())
            .await?;
        Ok(true)
    }

    /// Logs out if the ticket's session is still the current one.
    pub async fn logout_if_current(&self, ticket: &SessionTicket) -> Result<bool, SessionStoreError> {
        let mut state = self.state.lock().await;
        if !is_current(&state, ticket) {
            tracing::debug!(
                ticket_epoch = ticket.epoch,
                current_epoch = state.epoch,
                "Ignoring expiry of a previous session"
            );
            return Ok(false);
        }
        self.commit_logout(&mut state).await?;
        Ok(true)
    }

    async fn commit_login(
        &self,
        state: &mut StoreState,
        identity: Identity,
        credential: Credential,
    ) -> Result<SessionSnapshot, SessionStoreError> {
        let user = serde_json::to_string(&identity)?;
        self.storage
            .set_items(&[
                (TOKEN_KEY, credential.expose().to_string()),
                (USER_KEY, user),
            ])
            .await?;

        if state.session.credential() != Some(&credential) {
            state.epoch += 1;
        }
        state.session = Session::new(identity, credential);
        state.phase = SessionPhase::Ready;
        tracing::debug!(epoch = state.epoch, "Session committed");
        Ok(self.publish(state))
    }

    async fn commit_logout(
        &self,
        state: &mut StoreState,
    ) -> Result<SessionSnapshot, SessionStoreError> {
        let removed = self.storage.remove_items(&[TOKEN_KEY, USER_KEY]).await;

        if state.session.is_authenticated() {
            state.epoch += 1;
        }
        state.session = Session::empty();
        state.phase = SessionPhase::Ready;
        let snapshot = self.publish(state);

        if let Err(e) = removed {
            tracing::error!(error = %e, "Failed to clear stored session");
            return Err(e.into());
        }
        tracing::debug!(epoch = state.epoch, "Session cleared");
        Ok(snapshot)
    }

    fn publish(&self, state: &StoreState) -> SessionSnapshot {
        let snapshot = state.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }

    async fn read_entry(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read stored session entry");
                None
            }
        }
    }
}

fn is_current(state: &StoreState, ticket: &SessionTicket) -> bool {
    state.epoch == ticket.epoch && state.session.credential() == Some(&ticket.credential)
}

fn rehydrate(token: &str, user: &str) -> Option<Session> {
    let credential = Credential::new(token).ok()?;
    let identity: Identity = serde_json::from_str(user).ok()?;
    Some(Session::new(identity, credential))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryLocalStorage;
    use async_trait::async_trait;
    use serde_json::json;

    fn identity(credits: i64) -> Identity {
        serde_json::from_value(json!({"email": "a@b.io", "id": 1, "credits": credits})).unwrap()
    }

    fn credential(token: &str) -> Credential {
        Credential::new(token).unwrap()
    }

    fn store_with(storage: InMemoryLocalStorage) -> SessionStore {
        SessionStore::new(Arc::new(storage))
    }

    struct FailingStorage;

    #[async_trait]
    impl LocalStorage for FailingStorage {
        async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io("disk unavailable".to_string()))
        }

        async fn set_items(&self, _entries: &[(&str, String)]) -> Result<(), StorageError> {
            Err(StorageError::Io("disk unavailable".to_string()))
        }

        async fn remove_items(&self, _keys: &[&str]) -> Result<(), StorageError> {
            Err(StorageError::Io("disk unavailable".to_string()))
        }
    }

    // ─── Initialization ───────────────────────────────────────────────

    #[tokio::test]
    async fn starts_in_loading_phase() {
        let store = store_with(InMemoryLocalStorage::new());
        assert!(!store.snapshot().is_ready());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn initialize_with_persisted_session_is_authenticated() {
        let storage = InMemoryLocalStorage::with_entries([
            (TOKEN_KEY, "tok"),
            (USER_KEY, r#"{"email":"a@b.io","id":1,"credits":4}"#),
        ]);
        let store = store_with(storage);

        let snapshot = store.initialize().await;

        assert!(snapshot.is_ready());
        assert!(snapshot.authenticated);
        assert_eq!(snapshot.identity.unwrap().credits, Some(4));
    }

    #[tokio::test]
    async fn initialize_without_entries_is_anonymous() {
        let store = store_with(InMemoryLocalStorage::new());
        let snapshot = store.initialize().await;
        assert!(snapshot.is_ready());
        assert!(!snapshot.authenticated);
    }

    #[tokio::test]
    async fn malformed_identity_degrades_and_clears_entries() {
        let storage = InMemoryLocalStorage::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, "{not json")]);
        let store = store_with(storage.clone());

        let snapshot = store.initialize().await;

        assert!(!snapshot.authenticated);
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn token_without_identity_degrades() {
        let storage = InMemoryLocalStorage::with_entries([(TOKEN_KEY, "tok")]);
        let store = store_with(storage);
        assert!(!store.initialize().await.authenticated);
    }

    #[tokio::test]
    async fn blank_token_degrades() {
        let storage = InMemoryLocalStorage::with_entries([(TOKEN_KEY, "  "), (USER_KEY, "{}")]);
        let store = store_with(storage);
        assert!(!store.initialize().await.authenticated);
    }

    #[tokio::test]
    async fn unreadable_storage_degrades() {
        let store = SessionStore::new(Arc::new(FailingStorage));
        let snapshot = store.initialize().await;
        assert!(snapshot.is_ready());
        assert!(!snapshot.authenticated);
    }

    #[tokio::test]
    async fn initialize_runs_once() {
        let storage = InMemoryLocalStorage::new();
        let store = store_with(storage.clone());
        store.initialize().await;
        store.login(identity(5), credential("tok")).await.unwrap();

        let snapshot = store.initialize().await;

        assert!(snapshot.authenticated);
    }

    // ─── Login / logout ───────────────────────────────────────────────

    #[tokio::test]
    async fn login_writes_both_copies() {
        let storage = InMemoryLocalStorage::new();
        let store = store_with(storage.clone());
        store.initialize().await;

        store.login(identity(5), credential("tok")).await.unwrap();

        let entries = storage.snapshot().await;
        assert_eq!(entries.get(TOKEN_KEY).map(String::as_str), Some("tok"));
        let stored: Identity = serde_json::from_str(&entries[USER_KEY]).unwrap();
        assert_eq!(Some(stored), store.snapshot().identity);
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn login_then_logout_round_trip() {
        let storage = InMemoryLocalStorage::new();
        let store = store_with(storage.clone());
        store.initialize().await;
        store.login(identity(5), credential("tok")).await.unwrap();

        let snapshot = store.logout().await.unwrap();

        assert!(!snapshot.authenticated);
        assert!(snapshot.identity.is_none());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let store = store_with(InMemoryLocalStorage::new());
        store.initialize().await;
        store.login(identity(5), credential("tok")).await.unwrap();

        let first = store.logout().await.unwrap();
        let second = store.logout().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn failed_durable_write_leaves_memory_untouched() {
        let store = SessionStore::new(Arc::new(FailingStorage));
        store.initialize().await;

        let result = store.login(identity(5), credential("tok")).await;

        assert!(matches!(result, Err(SessionStoreError::Storage(_))));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_memory_even_if_storage_fails() {
        let store = SessionStore::new(Arc::new(FailingStorage));
        {
            let mut state = store.state.lock().await;
            state.session = Session::new(identity(5), credential("tok"));
            state.phase = SessionPhase::Ready;
        }

        assert!(store.logout().await.is_err());
        assert!(!store.is_authenticated());
        assert!(store.snapshot().identity.is_none());
    }

    // ─── Epochs and tickets ───────────────────────────────────────────

    #[tokio::test]
    async fn same_credential_keeps_epoch() {
        let store = store_with(InMemoryLocalStorage::new());
        store.initialize().await;
        let first = store.login(identity(5), credential("tok")).await.unwrap();
        let second = store.login(identity(4), credential("tok")).await.unwrap();
        assert_eq!(first.epoch, second.epoch);
    }

    #[tokio::test]
    async fn new_credential_advances_epoch() {
        let store = store_with(InMemoryLocalStorage::new());
        store.initialize().await;
        let first = store.login(identity(5), credential("a")).await.unwrap();
        let second = store.login(identity(5), credential("b")).await.unwrap();
        assert!(second.epoch > first.epoch);
    }

    #[tokio::test]
    async fn ticket_requires_session() {
        let store = store_with(InMemoryLocalStorage::new());
        store.initialize().await;
        assert!(store.ticket().await.is_none());

        store.login(identity(5), credential("tok")).await.unwrap();
        let ticket = store.ticket().await.unwrap();
        assert_eq!(ticket.credential, credential("tok"));
        assert_eq!(ticket.identity.credits, Some(5));
    }

    #[tokio::test]
    async fn update_applies_for_current_ticket() {
        let store = store_with(InMemoryLocalStorage::new());
        store.initialize().await;
        store.login(identity(5), credential("tok")).await.unwrap();
        let ticket = store.ticket().await.unwrap();

        let applied = store
            .update_identity(&ticket, |current| current.with_credits(3))
            .await
            .unwrap();

        assert!(applied);
        assert_eq!(store.snapshot().identity.unwrap().credits, Some(3));
    }

    #[tokio::test]
    async fn update_after_logout_is_discarded() {
        let storage = InMemoryLocalStorage::new();
        let store = store_with(storage.clone());
        store.initialize().await;
        store.login(identity(5), credential("tok")).await.unwrap();
        let ticket = store.ticket().await.unwrap();
        store.logout().await.unwrap();

        let applied = store
            .update_identity(&ticket, |current| current.with_credits(3))
            .await
            .unwrap();

        assert!(!applied);
        assert!(!store.is_authenticated());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn stale_expiry_does_not_log_out_new_user() {
        let store = store_with(InMemoryLocalStorage::new());
        store.initialize().await;
        store.login(identity(5), credential("old")).await.unwrap();
        let old_ticket = store.ticket().await.unwrap();
        store.login(identity(5), credential("new")).await.unwrap();

        let logged_out = store.logout_if_current(&old_ticket).await.unwrap();

        assert!(!logged_out);
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn subscribers_observe_commits() {
        let store = store_with(InMemoryLocalStorage::new());
        let mut rx = store.subscribe();
        store.initialize().await;

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_ready());

        store.login(identity(5), credential("tok")).await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().authenticated);
    }
}
