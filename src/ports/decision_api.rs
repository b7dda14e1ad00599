//! DecisionApi port - decision analysis and history.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::decision::{AnalysisResult, DecisionRequest, HistoryRecord};
use crate::domain::foundation::Credential;

/// Body of the history endpoint as received.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryPayload {
    /// A JSON array, parsed record by record.
    Records(Vec<HistoryRecord>),
    /// Something other than an array; carries the JSON kind for logging.
    Unexpected(&'static str),
}

/// Port for the decision endpoints.
#[async_trait]
pub trait DecisionApi: Send + Sync {
    /// Submit a decision for analysis. Consumes one credit on success.
    async fn analyze(
        &self,
        credential: &Credential,
        request: &DecisionRequest,
    ) -> Result<AnalysisResult, ApiError>;

    /// Fetch past decisions. The bearer is attached when present.
    async fn history(&self, credential: Option<&Credential>) -> Result<HistoryPayload, ApiError>;
}
