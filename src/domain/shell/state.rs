//! Gated shell lifecycle.
//!
//! ```text
//!            ┌──────────── logout / 401 ───────────┐
//!            v                                      │
//! Loading ─► Anonymous ── login/register ──► Authenticated(tab)
//!    │                                        ^      │ select tab
//!    └──── rehydrated with credential ────────┘      └───────┘
//! ```
//!
//! Entering `Authenticated` from anywhere else always lands on the overview
//! tab. Nothing leaves back to `Loading`.

use crate::domain::foundation::StateMachine;

use super::Tab;

/// Top-level view selector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Loading,
    Anonymous,
    Authenticated(Tab),
}

impl ShellState {
    /// State entered when a session appears.
    pub fn fresh_authenticated() -> Self {
        ShellState::Authenticated(Tab::default())
    }
}

impl StateMachine for ShellState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ShellState::*;
        match (self, target) {
            (Loading, Anonymous) => true,
            (Loading, Authenticated(tab)) | (Anonymous, Authenticated(tab)) => {
                *tab == Tab::default()
            }
            (Authenticated(_), Anonymous) => true,
            (Authenticated(_), Authenticated(_)) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ShellState::*;
        match self {
            Loading => vec![Anonymous, Self::fresh_authenticated()],
            Anonymous => vec![Self::fresh_authenticated()],
            Authenticated(_) => {
                let mut targets = vec![Anonymous];
                targets.extend(Tab::ALL.iter().map(|t| Authenticated(*t)));
                targets
            }
        }
    }
}
