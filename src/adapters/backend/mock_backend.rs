//! Mock Backend - scripted implementation of every backend port.
//!
//! Responses are queued per endpoint and handed out in order. Every call is
//! recorded before its response is produced, so tests can assert both what
//! was sent and that nothing was sent.
//!
//! `pause()` holds responses back until `resume()`, which lets a test change
//! session state while a request is in flight.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

use crate::domain::decision::{AnalysisResult, DecisionRequest};
use crate::domain::foundation::{Credential, LoginCredentials};
use crate::domain::membership::{PaymentReceipt, PaymentRequest};
use crate::domain::research::{ChartImage, VisionReport};
use crate::ports::{
    ApiError, AuthApi, AuthGrant, AuthMode, DecisionApi, HistoryPayload, PaymentApi, ResearchApi,
};

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Authenticate { mode: AuthMode, email: String },
    Analyze { bearer: String, request: DecisionRequest },
    History { bearer: Option<String> },
    AnalyzeChart { bearer: Option<String>, file_name: String },
    ProcessPayment { bearer: String, request: PaymentRequest },
}

impl BackendCall {
    pub fn kind(&self) -> &'static str {
        match self {
            BackendCall::Authenticate { .. } => "authenticate",
            BackendCall::Analyze { .. } => "analyze",
            BackendCall::History { .. } => "history",
            BackendCall::AnalyzeChart { .. } => "analyze_chart",
            BackendCall::ProcessPayment { .. } => "process_payment",
        }
    }
}

type Script<T> = Mutex<VecDeque<Result<T, ApiError>>>;

/// Scripted backend.
pub struct MockBackend {
    auth: Script<AuthGrant>,
    analyze: Script<AnalysisResult>,
    history: Script<HistoryPayload>,
    research: Script<VisionReport>,
    payment: Script<PaymentReceipt>,
    calls: Mutex<Vec<BackendCall>>,
    paused: watch::Sender<bool>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        let (paused, _) = watch::channel(false);
        Self {
            auth: Mutex::new(VecDeque::new()),
            analyze: Mutex::new(VecDeque::new()),
            history: Mutex::new(VecDeque::new()),
            research: Mutex::new(VecDeque::new()),
            payment: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            paused,
        }
    }

    pub async fn push_auth(&self, response: Result<AuthGrant, ApiError>) {
        self.auth.lock().await.push_back(response);
    }

    pub async fn push_analyze(&self, response: Result<AnalysisResult, ApiError>) {
        self.analyze.lock().await.push_back(response);
    }

    pub async fn push_history(&self, response: Result<HistoryPayload, ApiError>) {
        self.history.lock().await.push_back(response);
    }

    pub async fn push_research(&self, response: Result<VisionReport, ApiError>) {
        self.research.lock().await.push_back(response);
    }

    pub async fn push_payment(&self, response: Result<PaymentReceipt, ApiError>) {
        self.payment.lock().await.push_back(response);
    }

    /// All calls made so far, in order.
    pub async fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Hold every response until `resume()`.
    pub fn pause(&self) {
        self.paused.send_replace(true);
    }

    pub fn resume(&self) {
        self.paused.send_replace(false);
    }

    /// Waits until at least `count` calls have been recorded.
    pub async fn wait_for_calls(&self, count: usize) {
        while self.call_count().await < count {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    }

    async fn respond<T>(&self, call: BackendCall, script: &Script<T>) -> Result<T, ApiError> {
        tracing::debug!(call = call.kind(), "Mock backend call");
        self.calls.lock().await.push(call);

        let mut paused = self.paused.subscribe();
        while *paused.borrow_and_update() {
            if paused.changed().await.is_err() {
                break;
            }
        }

        script.lock().await.pop_front().unwrap_or_else(|| {
            Err(ApiError::Network(
                "mock backend has no scripted response".to_string(),
            ))
        })
    }
}

fn bearer(credential: Option<&Credential>) -> Option<String> {
    credential.map(|c| c.expose().to_string())
}

#[async_trait]
impl AuthApi for MockBackend {
    async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &LoginCredentials,
    ) -> Result<AuthGrant, ApiError> {
        let call = BackendCall::Authenticate {
            mode,
            email: credentials.email().to_string(),
        };
        self.respond(call, &self.auth).await
    }
}

#[async_trait]
impl DecisionApi for MockBackend {
    async fn analyze(
        &self,
        credential: &Credential,
        request: &DecisionRequest,
    ) -> Result<AnalysisResult, ApiError> {
        let call = BackendCall::Analyze {
            bearer: credential.expose().to_string(),
            request: request.clone(),
        };
        self.respond(call, &self.analyze).await
    }

    async fn history(&self, credential: Option<&Credential>) -> Result<HistoryPayload, ApiError> {
        let call = BackendCall::History {
            bearer: bearer(credential),
        };
        self.respond(call, &self.history).await
    }
}

#[async_trait]
impl ResearchApi for MockBackend {
    async fn analyze_chart(
        &self,
        credential: Option<&Credential>,
        image: &ChartImage,
    ) -> Result<VisionReport, ApiError> {
        let call = BackendCall::AnalyzeChart {
            bearer: bearer(credential),
            file_name: image.file_name().to_string(),
        };
        self.respond(call, &self.research).await
    }
}

#[async_trait]
impl PaymentApi for MockBackend {
    async fn process_payment(
        &self,
        credential: &Credential,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, ApiError> {
        let call = BackendCall::ProcessPayment {
            bearer: credential.expose().to_string(),
            request: request.clone(),
        };
        self.respond(call, &self.payment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let mock = MockBackend::new();
        mock.push_history(Ok(HistoryPayload::Records(Vec::new()))).await;
        mock.push_history(Err(ApiError::Timeout { timeout_secs: 1 }))
            .await;

        assert!(mock.history(None).await.is_ok());
        assert!(mock.history(None).await.is_err());
        assert_eq!(mock.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_unscripted_call_is_network_error() {
        let mock = MockBackend::new();
        let err = mock.history(None).await.unwrap_err();
        assert!(err.is_connectivity());
    }

    #[tokio::test]
    async fn test_records_bearer() {
        let mock = MockBackend::new();
        let credential = Credential::new("tok").unwrap();
        let _ = mock.history(Some(&credential)).await;
        assert_eq!(
            mock.calls().await,
            vec![BackendCall::History {
                bearer: Some("tok".to_string())
            }]
        );
    }

    #[tokio::test]
    async fn test_pause_holds_response_until_resume() {
        let mock = Arc::new(MockBackend::new());
        mock.push_history(Ok(HistoryPayload::Records(Vec::new()))).await;
        mock.pause();

        let task = {
            let mock = mock.clone();
            tokio::spawn(async move { mock.history(None).await })
        };
        mock.wait_for_calls(1).await;
        assert!(!task.is_finished());

        mock.resume();
        assert!(task.await.unwrap().is_ok());
    }
}
