//! Decision handlers.
//!
//! ## Commands
//! - Submitting a decision for analysis (consumes a credit)
//!
//! ## Queries
//! - Listing past decisions

mod analyze_decision;
mod get_history;

// Commands
pub use analyze_decision::{
    AnalyzeDecisionCommand, AnalyzeDecisionError, AnalyzeDecisionHandler, AnalyzeDecisionOutcome,
    TRIAL_EXHAUSTED,
};

// Queries
pub use get_history::{GetHistoryHandler, HistoryError};
