//! Errors returned by the backend ports.

use thiserror::Error;

/// Failure modes of a backend call, classified by how the client reacts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// HTTP 401: credential missing, invalid or expired.
    #[error("unauthorized{}", detail_suffix(.detail))]
    Unauthorized { detail: Option<String> },

    /// HTTP 402: entitlement exhausted.
    #[error("payment required: {detail}")]
    PaymentRequired { detail: String },

    /// Any other non-success status.
    #[error("request rejected with status {status}{}", detail_suffix(.detail))]
    Rejected { status: u16, detail: Option<String> },

    /// Connection could not be made or was dropped.
    #[error("network error: {0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Response body could not be read as the expected schema.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Backend-supplied `detail` message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Rejected { detail, .. } => {
                detail.as_deref()
            }
            ApiError::PaymentRequired { detail } => Some(detail),
            _ => None,
        }
    }

    /// True for failures where the backend was never reached or never answered.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout { .. })
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}
