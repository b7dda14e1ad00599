//! Pricing view and payment confirmation.

use crate::domain::membership::{Currency, PaymentReceipt, PricingPlan, FREEMIUM_PLAN, PREMIUM_PLAN};
use crate::domain::session::Identity;

/// Plans priced in `currency`. The plan the identity already holds is
/// marked ALREADY_ACTIVE.
pub fn render_pricing(currency: Currency, identity: Option<&Identity>) -> String {
    let current = identity.map(|i| i.tier());
    let mut out = format!(
        "CAPITAL REGION: {} (gateway: {})\n\n",
        currency,
        currency.payment_method().display_name()
    );
    for plan in [&FREEMIUM_PLAN, &PREMIUM_PLAN] {
        out.push_str(&render_plan(plan, currency, current == Some(plan.tier)));
    }
    out
}

fn render_plan(plan: &PricingPlan, currency: Currency, active: bool) -> String {
    let mut section = format!("{}  {}", plan.title, plan.price_label(currency));
    if plan.tier.is_paid() {
        section.push_str(" PER_YEAR_ACCESS");
    }
    if active {
        section.push_str("  [ALREADY_ACTIVE]");
    }
    section.push('\n');
    for feature in plan.features {
        section.push_str(&format!("  - {}\n", feature));
    }
    section.push('\n');
    section
}

pub fn render_receipt(receipt: &PaymentReceipt) -> String {
    let mut out = format!("SUBSCRIPTION ACTIVE: {}\n", receipt.granted_tier());
    if let Some(id) = &receipt.transaction_id {
        out.push_str(&format!("TRANSACTION: {}\n", id));
    }
    if let (Some(amount), Some(currency)) = (receipt.amount, &receipt.currency) {
        out.push_str(&format!("CHARGED: {} {}\n", amount, currency));
    }
    out
}
