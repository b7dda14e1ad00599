//! AnalyzeChart - Command handler for chart vision analysis.

use std::sync::Arc;
use thiserror::Error;

use crate::application::session_store::SessionStore;
use crate::domain::foundation::ValidationError;
use crate::domain::research::{ChartImage, VisionReport};
use crate::ports::{ApiError, ResearchApi};

/// Command to upload a chart image.
#[derive(Clone)]
pub struct AnalyzeChartCommand {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for AnalyzeChartCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzeChartCommand")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Errors from the chart analysis flow.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// The session store has not finished initializing.
    #[error("session is still loading")]
    NotReady,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Network error. Is the backend running?")]
    Network(#[source] ApiError),

    #[error("chart analysis failed: {}", .0.detail().unwrap_or("unexpected response"))]
    Failed(#[source] ApiError),
}

/// Handler for chart uploads.
pub struct AnalyzeChartHandler {
    api: Arc<dyn ResearchApi>,
    store: Arc<SessionStore>,
}

impl AnalyzeChartHandler {
    pub fn new(api: Arc<dyn ResearchApi>, store: Arc<SessionStore>) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, cmd: AnalyzeChartCommand) -> Result<VisionReport, ResearchError> {
        // 1. Nothing is sent before the session is known
        if !self.store.snapshot().is_ready() {
            return Err(ResearchError::NotReady);
        }

        // 2. Must be an image; nothing is sent otherwise
        let image = ChartImage::new(cmd.file_name, cmd.bytes)?;

        // 3. Upload
        let ticket = self.store.ticket().await;
        tracing::debug!(file = image.file_name(), size = image.len(), "Uploading chart");
        let report = self
            .api
            .analyze_chart(ticket.as_ref().map(|t| &t.credential), &image)
            .await
            .map_err(|e| {
                if e.is_connectivity() {
                    ResearchError::Network(e)
                } else {
                    ResearchError::Failed(e)
                }
            })?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryLocalStorage;
    use crate::adapters::{BackendCall, MockBackend};
    use crate::domain::research::VisionAnalysis;

    async fn setup() -> (Arc<MockBackend>, AnalyzeChartHandler) {
        let backend = Arc::new(MockBackend::new());
        let store = Arc::new(SessionStore::new(Arc::new(InMemoryLocalStorage::new())));
        store.initialize().await;
        (backend.clone(), AnalyzeChartHandler::new(backend, store))
    }

    #[tokio::test]
    async fn test_image_is_uploaded() {
        let (backend, handler) = setup().await;
        backend
            .push_research(Ok(VisionReport {
                status: Some("success".to_string()),
                analysis: VisionAnalysis {
                    confidence_score: 82.0,
                    ..Default::default()
                },
            }))
            .await;

        let report = handler
            .handle(AnalyzeChartCommand {
                file_name: "btc.png".to_string(),
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap();

        assert_eq!(report.analysis.confidence_score, 82.0);
        assert_eq!(
            backend.calls().await,
            vec![BackendCall::AnalyzeChart {
                bearer: None,
                file_name: "btc.png".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_non_image_sends_nothing() {
        let (backend, handler) = setup().await;

        let err = handler
            .handle(AnalyzeChartCommand {
                file_name: "notes.txt".to_string(),
                bytes: b"hello".to_vec(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ResearchError::Validation(_)));
        assert_eq!(backend.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_no_upload_while_store_loading() {
        let backend = Arc::new(MockBackend::new());
        let store = Arc::new(SessionStore::new(Arc::new(InMemoryLocalStorage::new())));
        let handler = AnalyzeChartHandler::new(backend.clone(), store);

        let err = handler
            .handle(AnalyzeChartCommand {
                file_name: "btc.png".to_string(),
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ResearchError::NotReady));
        assert_eq!(backend.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_backend_rejection_surfaces_detail() {
        let (backend, handler) = setup().await;
        backend
            .push_research(Err(ApiError::Rejected {
                status: 400,
                detail: Some("Invalid file type. Please upload an image.".to_string()),
            }))
            .await;

        let err = handler
            .handle(AnalyzeChartCommand {
                file_name: "chart.webp".to_string(),
                bytes: vec![1],
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "chart analysis failed: Invalid file type. Please upload an image."
        );
    }
}
