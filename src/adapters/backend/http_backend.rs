//! HTTP Backend - Implementation of the backend ports over the PRISM REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpBackendConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let backend = HttpBackend::new(config)?;
//! ```
//!
//! # Status mapping
//!
//! - 401 -> `ApiError::Unauthorized`
//! - 402 -> `ApiError::PaymentRequired`
//! - other non-2xx -> `ApiError::Rejected`, carrying the body's `detail`

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::wire::{extract_detail, json_kind, AuthRequestBody, AuthResponseBody};
use crate::config::ApiConfig;
use crate::domain::decision::{AnalysisResult, DecisionRequest, HistoryRecord};
use crate::domain::foundation::{Credential, LoginCredentials};
use crate::domain::membership::{PaymentReceipt, PaymentRequest};
use crate::domain::research::{ChartImage, VisionReport};
use crate::ports::{
    ApiError, AuthApi, AuthGrant, AuthMode, DecisionApi, HistoryPayload, PaymentApi, ResearchApi,
};

const ANALYZE_PATH: &str = "/api/analyze";
const HISTORY_PATH: &str = "/api/history";
const RESEARCH_UPLOAD_PATH: &str = "/api/research/upload";
const PAYMENT_PATH: &str = "/api/payments/process";

/// Configuration for the HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpBackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&ApiConfig> for HttpBackendConfig {
    fn from(config: &ApiConfig) -> Self {
        Self::new(config.normalized_base_url()).with_timeout(config.request_timeout())
    }
}

/// reqwest-backed client for every backend port.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: HttpBackendConfig,
    client: Client,
}

impl HttpBackend {
    /// Creates a backend client with the given configuration.
    pub fn new(config: HttpBackendConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn with_bearer(builder: RequestBuilder, credential: Option<&Credential>) -> RequestBuilder {
        match credential {
            Some(credential) => builder.bearer_auth(credential.expose()),
            None => builder,
        }
    }

    async fn send(&self, path: &str, builder: RequestBuilder) -> Result<Response, ApiError> {
        tracing::debug!(path, "Sending backend request");
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        tracing::debug!(path, status = response.status().as_u16(), "Backend responded");
        Self::handle_response_status(response).await
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ApiError::Network(format!("Connection failed: {}", e))
        } else {
            ApiError::Network(e.to_string())
        }
    }

    /// Maps non-success statuses to `ApiError`, reading `detail` from the body.
    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&error_body);

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized { detail }),
            StatusCode::PAYMENT_REQUIRED => Err(ApiError::PaymentRequired {
                detail: detail.unwrap_or_else(|| "Entitlement exhausted".to_string()),
            }),
            _ => Err(ApiError::Rejected {
                status: status.as_u16(),
                detail,
            }),
        }
    }

    async fn parse_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                ApiError::Parse(format!("Failed to parse response: {}", e))
            }
        })
    }
}

#[async_trait]
impl AuthApi for HttpBackend {
    async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &LoginCredentials,
    ) -> Result<AuthGrant, ApiError> {
        let body = AuthRequestBody {
            email: credentials.email(),
            password: credentials.expose_password(),
        };
        let builder = self.client.post(self.url(mode.path())).json(&body);
        let response = self.send(mode.path(), builder).await?;
        let body: AuthResponseBody = self.parse_json(response).await?;

        let token = body
            .access_token
            .ok_or_else(|| ApiError::Parse("Response is missing access_token".to_string()))?;
        let credential =
            Credential::new(token).map_err(|e| ApiError::Parse(format!("Unusable token: {}", e)))?;
        let identity = body
            .user
            .ok_or_else(|| ApiError::Parse("Response is missing user".to_string()))?;

        Ok(AuthGrant {
            identity,
            credential,
            token_type: body.token_type,
        })
    }
}

#[async_trait]
impl DecisionApi for HttpBackend {
    async fn analyze(
        &self,
        credential: &Credential,
        request: &DecisionRequest,
    ) -> Result<AnalysisResult, ApiError> {
        let builder = self.client.post(self.url(ANALYZE_PATH)).json(request);
        let builder = Self::with_bearer(builder, Some(credential));
        let response = self.send(ANALYZE_PATH, builder).await?;
        self.parse_json(response).await
    }

    async fn history(&self, credential: Option<&Credential>) -> Result<HistoryPayload, ApiError> {
        let builder = Self::with_bearer(self.client.get(self.url(HISTORY_PATH)), credential);
        let response = self.send(HISTORY_PATH, builder).await?;
        let body: Value = self.parse_json(response).await?;

        let items = match body {
            Value::Array(items) => items,
            other => return Ok(HistoryPayload::Unexpected(json_kind(&other))),
        };

        let total = items.len();
        let records: Vec<HistoryRecord> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        if records.len() < total {
            tracing::warn!(
                skipped = total - records.len(),
                "Skipped unreadable history records"
            );
        }
        Ok(HistoryPayload::Records(records))
    }
}

#[async_trait]
impl ResearchApi for HttpBackend {
    async fn analyze_chart(
        &self,
        credential: Option<&Credential>,
        image: &ChartImage,
    ) -> Result<VisionReport, ApiError> {
        let part = multipart::Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.content_type())
            .map_err(|e| ApiError::Network(format!("Invalid upload content type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        let builder = self
            .client
            .post(self.url(RESEARCH_UPLOAD_PATH))
            .multipart(form);
        let builder = Self::with_bearer(builder, credential);
        let response = self.send(RESEARCH_UPLOAD_PATH, builder).await?;
        self.parse_json(response).await
    }
}

#[async_trait]
impl PaymentApi for HttpBackend {
    async fn process_payment(
        &self,
        credential: &Credential,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, ApiError> {
        let builder = self.client.post(self.url(PAYMENT_PATH)).json(request);
        let builder = Self::with_bearer(builder, Some(credential));
        let response = self.send(PAYMENT_PATH, builder).await?;
        self.parse_json(response).await
    }
}
