//! PaymentApi port - subscription payments.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::foundation::Credential;
use crate::domain::membership::{PaymentReceipt, PaymentRequest};

/// Port for the payment endpoint.
#[async_trait]
pub trait PaymentApi: Send + Sync {
    async fn process_payment(
        &self,
        credential: &Credential,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, ApiError>;
}
