//! Identity - the backend-issued user record.
//!
//! The backend owns this record. The client reads a handful of fields for
//! gating and display, and carries everything else through untouched so a
//! persisted identity re-serializes to what the backend sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::UserId;
use crate::domain::membership::{Currency, SubscriptionTier};

/// Logged-in user record, including entitlement fields (credits, tier).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Raw tier string, e.g. `FREEMIUM` or `PREMIUM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<String>,

    /// Remaining analysis credits. Absent means the backend did not report
    /// a count, which is not the same as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_pref: Option<String>,

    /// Fields this client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    /// Subscription tier as read from `subscription_status`.
    pub fn tier(&self) -> SubscriptionTier {
        self.subscription_status
            .as_deref()
            .map(SubscriptionTier::from_status)
            .unwrap_or_default()
    }

    /// True when the backend has reported that no credits remain.
    pub fn credits_exhausted(&self) -> bool {
        matches!(self.credits, Some(n) if n <= 0)
    }

    /// Preferred billing currency, if the stored value is recognized.
    pub fn currency(&self) -> Option<Currency> {
        self.currency_pref.as_deref().and_then(|c| c.parse().ok())
    }

    /// Email for display, or a placeholder.
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("anonymous analyst")
    }

    /// Copy of this identity with a revised credit count.
    pub fn with_credits(&self, credits: i64) -> Self {
        Self {
            credits: Some(credits),
            ..self.clone()
        }
    }

    /// Copy of this identity after a subscription change.
    pub fn with_subscription(&self, status: impl Into<String>, currency: Currency) -> Self {
        Self {
            subscription_status: Some(status.into()),
            currency_pref: Some(currency.code().to_string()),
            ..self.clone()
        }
    }
}
