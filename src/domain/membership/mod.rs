//! Membership module - subscription tiers, pricing and payments.

mod payment;
mod plan;
mod tier;

pub use payment::{PaymentReceipt, PaymentRequest};
pub use plan::{Currency, PaymentMethod, PricingPlan, FREEMIUM_PLAN, PREMIUM_PLAN};
pub use tier::SubscriptionTier;
