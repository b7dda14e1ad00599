//! Shell domain module - gating states and tabs.

mod state;
mod tab;

pub use state::ShellState;
pub use tab::Tab;
