//! GatedShell - top-level view selector driven by the session store.
//!
//! The shell never decides between landing and application while the store
//! is still loading, so a persisted session goes straight from `Loading` to
//! `Authenticated` without passing through `Anonymous`.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use super::SessionStore;
use crate::domain::foundation::{StateMachine, ValidationError};
use crate::domain::session::SessionSnapshot;
use crate::domain::shell::{ShellState, Tab};

/// Errors from shell dispatch.
#[derive(Debug, Error, PartialEq)]
pub enum ShellError {
    /// The session store has not finished initializing.
    #[error("session is still loading")]
    NotReady,

    /// The requested view needs a session.
    #[error("sign in required")]
    NotAuthenticated,

    #[error("invalid shell transition: {0}")]
    InvalidTransition(#[from] ValidationError),
}

/// Which screen the shell presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellView {
    Splash,
    Landing,
    Tab(Tab),
}

struct ShellInner {
    state: ShellState,
    epoch: u64,
}

/// Gated application shell.
pub struct GatedShell {
    store: Arc<SessionStore>,
    inner: Mutex<ShellInner>,
}

impl GatedShell {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            inner: Mutex::new(ShellInner {
                state: ShellState::Loading,
                epoch: 0,
            }),
        }
    }

    /// Current state without re-reading the store.
    pub async fn state(&self) -> ShellState {
        self.inner.lock().await.state
    }

    /// Waits until the session store is ready, then syncs.
    pub async fn wait_ready(&self) -> Result<ShellState, ShellError> {
        let mut snapshots = self.store.subscribe();
        loop {
            if snapshots.borrow_and_update().is_ready() {
                break;
            }
            if snapshots.changed().await.is_err() {
                return Err(ShellError::NotReady);
            }
        }
        self.sync().await
    }

    /// Reconciles the shell with the latest session snapshot.
    pub async fn sync(&self) -> Result<ShellState, ShellError> {
        let snapshot = self.store.snapshot();
        let mut inner = self.inner.lock().await;
        let next = next_state(inner.state, inner.epoch, &snapshot);

        if next != inner.state {
            let next = inner.state.transition_to(next)?;
            tracing::debug!(from = ?inner.state, to = ?next, "Shell transition");
            inner.state = next;
        }
        inner.epoch = snapshot.epoch;
        Ok(inner.state)
    }

    /// Switches the active tab. Only valid while authenticated.
    pub async fn select_tab(&self, tab: Tab) -> Result<ShellState, ShellError> {
        let current = self.sync().await?;
        match current {
            ShellState::Loading => Err(ShellError::NotReady),
            ShellState::Anonymous => Err(ShellError::NotAuthenticated),
            ShellState::Authenticated(_) => {
                let mut inner = self.inner.lock().await;
                inner.state = inner.state.transition_to(ShellState::Authenticated(tab))?;
                Ok(inner.state)
            }
        }
    }

    /// The view to render for the current state.
    pub async fn current_view(&self) -> ShellView {
        match self.state().await {
            ShellState::Loading => ShellView::Splash,
            ShellState::Anonymous => ShellView::Landing,
            ShellState::Authenticated(tab) => ShellView::Tab(tab),
        }
    }
}

fn next_state(current: ShellState, last_epoch: u64, snapshot: &SessionSnapshot) -> ShellState {
    if !snapshot.is_ready() {
        return current;
    }
    match (current, snapshot.authenticated) {
        (ShellState::Authenticated(_), true) if snapshot.epoch != last_epoch => {
            ShellState::fresh_authenticated()
        }
        (ShellState::Authenticated(tab), true) => ShellState::Authenticated(tab),
        (_, true) => ShellState::fresh_authenticated(),
        (_, false) => ShellState::Anonymous,
    }
}
