//! Payment request and receipt.

use serde::{Deserialize, Serialize};

use super::{Currency, PaymentMethod, PricingPlan, SubscriptionTier};
use crate::domain::foundation::UserId;

/// Body sent to the payment endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub user_id: Option<UserId>,
    pub amount: f64,
    pub currency: Currency,
    pub method: PaymentMethod,
}

impl PaymentRequest {
    /// Builds the request for subscribing to `plan` in `currency`.
    pub fn for_plan(plan: &PricingPlan, currency: Currency, user_id: Option<UserId>) -> Self {
        Self {
            user_id,
            amount: plan.price(currency),
            currency,
            method: currency.payment_method(),
        }
    }
}

/// Confirmation returned by the payment endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentReceipt {
    pub status: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub tier: Option<String>,
}

impl PaymentReceipt {
    /// Tier granted by this payment; PREMIUM when the backend omits it.
    pub fn granted_tier(&self) -> SubscriptionTier {
        self.tier
            .as_deref()
            .map(SubscriptionTier::from_status)
            .unwrap_or(SubscriptionTier::Premium)
    }
}
