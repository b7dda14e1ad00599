//! GetHistory - Query handler for past decisions.

use std::sync::Arc;
use thiserror::Error;

use crate::application::session_store::SessionStore;
use crate::domain::decision::{sort_newest_first, HistoryRecord};
use crate::ports::{ApiError, DecisionApi, HistoryPayload};

/// Errors from the history query.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The session store has not finished initializing.
    #[error("session is still loading")]
    NotReady,

    #[error("Network error. Is the backend running?")]
    Network(#[source] ApiError),

    #[error("failed to load history: {0}")]
    Failed(#[source] ApiError),
}

/// Handler for the history list.
pub struct GetHistoryHandler {
    api: Arc<dyn DecisionApi>,
    store: Arc<SessionStore>,
}

impl GetHistoryHandler {
    pub fn new(api: Arc<dyn DecisionApi>, store: Arc<SessionStore>) -> Self {
        Self { api, store }
    }

    /// Past decisions, newest first. A body that is not a list reads as
    /// an empty history.
    pub async fn handle(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        if !self.store.snapshot().is_ready() {
            return Err(HistoryError::NotReady);
        }

        let ticket = self.store.ticket().await;
        let credential = ticket.as_ref().map(|t| &t.credential);

        let payload = self.api.history(credential).await.map_err(|e| {
            if e.is_connectivity() {
                HistoryError::Network(e)
            } else {
                HistoryError::Failed(e)
            }
        })?;

        let mut records = match payload {
            HistoryPayload::Records(records) => records,
            HistoryPayload::Unexpected(kind) => {
                tracing::warn!(kind, "History response is not a list; showing empty history");
                Vec::new()
            }
        };
        sort_newest_first(&mut records);
        Ok(records)
    }
}
