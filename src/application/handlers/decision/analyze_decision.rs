//! AnalyzeDecision - Command handler for submitting a decision for analysis.
//!
//! Entitlement-mutating: a successful analysis consumes a credit, and the
//! revised count is written back to the session store under the same
//! credential so the header stays consistent without another request.

use std::sync::Arc;
use thiserror::Error;

use crate::application::session_store::{SessionStore, SessionStoreError};
use crate::domain::decision::{AnalysisResult, DecisionForm};
use crate::domain::foundation::ValidationError;
use crate::ports::{ApiError, DecisionApi};

/// Upsell message used when the client blocks locally.
pub const TRIAL_EXHAUSTED: &str = "Trial limit reached. Please upgrade to continue.";

/// Command to analyze a decision.
#[derive(Debug, Clone)]
pub struct AnalyzeDecisionCommand {
    pub form: DecisionForm,
}

/// Result of a decision submission that reached a definite answer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeDecisionOutcome {
    /// The backend produced a report.
    Report(AnalysisResult),
    /// No credits remain; prompt the upgrade path.
    UpgradeRequired { detail: String },
}

/// Errors from the analysis flow.
#[derive(Debug, Error)]
pub enum AnalyzeDecisionError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("sign in required")]
    NotAuthenticated,

    /// 401: the session was cleared and the user must sign in again.
    #[error("session expired; please sign in again")]
    SessionExpired,

    /// The response belongs to a session that has since ended.
    #[error("session changed while the analysis was running")]
    SessionChanged,

    #[error("Network error. Is the backend running?")]
    Network(#[source] ApiError),

    #[error("analysis failed: {0}")]
    Failed(#[source] ApiError),

    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

/// Handler for decision analysis.
pub struct AnalyzeDecisionHandler {
    api: Arc<dyn DecisionApi>,
    store: Arc<SessionStore>,
}

impl AnalyzeDecisionHandler {
    pub fn new(api: Arc<dyn DecisionApi>, store: Arc<SessionStore>) -> Self {
        Self { api, store }
    }

    pub async fn handle(
        &self,
        cmd: AnalyzeDecisionCommand,
    ) -> Result<AnalyzeDecisionOutcome, AnalyzeDecisionError> {
        // 1. Form validation, before any request
        let request = cmd.form.validate()?;

        // 2. Capture the session this request belongs to
        let ticket = self
            .store
            .ticket()
            .await
            .ok_or(AnalyzeDecisionError::NotAuthenticated)?;

        // 3. Known-exhausted entitlement blocks locally
        if ticket.identity.credits_exhausted() {
            tracing::debug!("Credits exhausted; not sending analysis request");
            return Ok(AnalyzeDecisionOutcome::UpgradeRequired {
                detail: TRIAL_EXHAUSTED.to_string(),
            });
        }

        let request = request.with_user(ticket.identity.id.clone());
        tracing::debug!(asset = %request.asset, action = %request.action, "Submitting decision");

        match self.api.analyze(&ticket.credential, &request).await {
            Ok(result) => {
                let applied = match result.user_credits {
                    Some(credits) => {
                        self.store
                            .update_identity(&ticket, |current| current.with_credits(credits))
                            .await?
                    }
                    None => self.store.is_current(&ticket).await,
                };
                if !applied {
                    tracing::warn!("Discarding analysis that arrived after the session changed");
                    return Err(AnalyzeDecisionError::SessionChanged);
                }
                Ok(AnalyzeDecisionOutcome::Report(result))
            }
            Err(ApiError::PaymentRequired { detail }) => {
                tracing::debug!(%detail, "Backend reports credits exhausted");
                Ok(AnalyzeDecisionOutcome::UpgradeRequired { detail })
            }
            Err(ApiError::Unauthorized { .. }) => {
                if self.store.logout_if_current(&ticket).await? {
                    tracing::warn!("Credential rejected; session cleared");
                }
                Err(AnalyzeDecisionError::SessionExpired)
            }
            Err(e) if e.is_connectivity() => Err(AnalyzeDecisionError::Network(e)),
            Err(e) => Err(AnalyzeDecisionError::Failed(e)),
        }
    }
}
