//! Application handlers.
//!
//! Command and query handlers that orchestrate the backend ports and the
//! session store.

pub mod decision;
pub mod membership;
pub mod research;
pub mod session;

pub use decision::{
    AnalyzeDecisionCommand, AnalyzeDecisionError, AnalyzeDecisionHandler, AnalyzeDecisionOutcome,
    GetHistoryHandler, HistoryError,
};
pub use membership::{PaymentError, ProcessPaymentCommand, ProcessPaymentHandler};
pub use research::{AnalyzeChartCommand, AnalyzeChartHandler, ResearchError};
pub use session::{AuthenticateCommand, AuthenticateError, AuthenticateHandler};
