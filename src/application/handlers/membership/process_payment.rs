//! ProcessPayment - Command handler for upgrading to the paid tier.
//!
//! Entitlement-mutating: on success the granted tier and the chosen
//! currency are merged into the stored identity under the same credential.

use std::sync::Arc;
use thiserror::Error;

use crate::application::session_store::{SessionStore, SessionStoreError};
use crate::domain::membership::{Currency, PaymentReceipt, PaymentRequest, PREMIUM_PLAN};
use crate::ports::{ApiError, PaymentApi};

/// Command to subscribe to the paid plan.
#[derive(Debug, Clone, Copy)]
pub struct ProcessPaymentCommand {
    pub currency: Currency,
}

/// Errors from the payment flow.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("sign in required")]
    NotAuthenticated,

    /// The identity already carries the paid tier.
    #[error("ALREADY_ACTIVE")]
    AlreadyActive,

    #[error("session expired; please sign in again")]
    SessionExpired,

    #[error("session changed while the payment was processing")]
    SessionChanged,

    #[error("Network error. Is the backend running?")]
    Network(#[source] ApiError),

    #[error("payment failed: {0}")]
    Failed(#[source] ApiError),

    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

/// Handler for the upgrade payment.
pub struct ProcessPaymentHandler {
    api: Arc<dyn PaymentApi>,
    store: Arc<SessionStore>,
}

impl ProcessPaymentHandler {
    pub fn new(api: Arc<dyn PaymentApi>, store: Arc<SessionStore>) -> Self {
        Self { api, store }
    }

    pub async fn handle(&self, cmd: ProcessPaymentCommand) -> Result<PaymentReceipt, PaymentError> {
        // 1. Capture the session this payment belongs to
        let ticket = self
            .store
            .ticket()
            .await
            .ok_or(PaymentError::NotAuthenticated)?;

        // 2. Nothing to buy if already on the paid tier
        if ticket.identity.tier() == PREMIUM_PLAN.tier {
            return Err(PaymentError::AlreadyActive);
        }

        // 3. Route to the currency's gateway
        let request = PaymentRequest::for_plan(&PREMIUM_PLAN, cmd.currency, ticket.identity.id.clone());
        tracing::info!(
            currency = %request.currency,
            gateway = request.method.display_name(),
            "Processing payment"
        );

        match self.api.process_payment(&ticket.credential, &request).await {
            Ok(receipt) => {
                // 4. Merge the granted tier into the current identity
                let tier = receipt.granted_tier();
                let applied = self
                    .store
                    .update_identity(&ticket, |current| {
                        current.with_subscription(tier.as_status(), cmd.currency)
                    })
                    .await?;
                if !applied {
                    tracing::warn!("Discarding payment receipt that arrived after the session changed");
                    return Err(PaymentError::SessionChanged);
                }
                tracing::info!(tier = %tier, "Subscription updated");
                Ok(receipt)
            }
            Err(ApiError::Unauthorized { .. }) => {
                if self.store.logout_if_current(&ticket).await? {
                    tracing::warn!("Credential rejected; session cleared");
                }
                Err(PaymentError::SessionExpired)
            }
            Err(e) if e.is_connectivity() => Err(PaymentError::Network(e)),
            Err(e) => Err(PaymentError::Failed(e)),
        }
    }
}
