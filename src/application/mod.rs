//! Application layer - session store, shell and handlers.
//!
//! The session store is the single owner of authentication state. Handlers
//! coordinate between the backend ports and the store; the shell only reads.

pub mod handlers;
pub mod session_store;
pub mod shell;

pub use handlers::{
    // Session
    AuthenticateCommand, AuthenticateError, AuthenticateHandler,
    // Decision
    AnalyzeDecisionCommand, AnalyzeDecisionError, AnalyzeDecisionHandler, AnalyzeDecisionOutcome,
    GetHistoryHandler, HistoryError,
    // Research
    AnalyzeChartCommand, AnalyzeChartHandler, ResearchError,
    // Membership
    PaymentError, ProcessPaymentCommand, ProcessPaymentHandler,
};
pub use session_store::{SessionStore, SessionStoreError, TOKEN_KEY, USER_KEY};
pub use shell::{GatedShell, ShellError, ShellView};
