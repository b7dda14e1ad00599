//! Pricing plans, currencies and payment routing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::SubscriptionTier;
use crate::domain::foundation::ValidationError;

/// Billing currency ("capital region").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
        }
    }

    /// Gateway that processes payments in this currency.
    pub fn payment_method(&self) -> PaymentMethod {
        match self {
            Currency::Usd => PaymentMethod::Stripe,
            Currency::Inr => PaymentMethod::Razorpay,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "INR" => Ok(Currency::Inr),
            other => Err(ValidationError::invalid_format(
                "currency",
                format!("unsupported currency '{}' (expected USD or INR)", other),
            )),
        }
    }
}

/// Payment gateway named in the payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Stripe,
    Razorpay,
}

impl PaymentMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Stripe => "Stripe",
            PaymentMethod::Razorpay => "Razorpay",
        }
    }
}

/// A plan shown on the pricing view.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingPlan {
    pub tier: SubscriptionTier,
    pub title: &'static str,
    usd_price: f64,
    inr_price: f64,
    pub features: &'static [&'static str],
}

impl PricingPlan {
    /// Price in the given currency, in major units.
    pub fn price(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.usd_price,
            Currency::Inr => self.inr_price,
        }
    }

    /// Price label as shown to the user ("$49", "₹3,999").
    pub fn price_label(&self, currency: Currency) -> String {
        let whole = self.price(currency).round() as u64;
        match currency {
            Currency::Usd => format!("${}", group_thousands(whole)),
            Currency::Inr => format!("₹{}", group_thousands(whole)),
        }
    }
}

/// Free plan.
pub const FREEMIUM_PLAN: PricingPlan = PricingPlan {
    tier: SubscriptionTier::Freemium,
    title: "FREEMIUM",
    usd_price: 0.0,
    inr_price: 0.0,
    features: &[
        "Basic Decision Analysis",
        "5 Saved Memories",
        "Standard UI",
    ],
};

/// Paid plan, billed per year.
pub const PREMIUM_PLAN: PricingPlan = PricingPlan {
    tier: SubscriptionTier::Premium,
    title: "PREMIUM_LAYER",
    usd_price: 49.0,
    inr_price: 3999.0,
    features: &[
        "Deep Behavioral Profiling",
        "Infinite Decision Memory",
        "Market Research Insights",
        "Multi-currency Logic",
    ],
};

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_routes_to_gateway() {
        assert_eq!(Currency::Usd.payment_method(), PaymentMethod::Stripe);
        assert_eq!(Currency::Inr.payment_method(), PaymentMethod::Razorpay);
    }

    #[test]
    fn premium_prices_per_currency() {
        assert_eq!(PREMIUM_PLAN.price(Currency::Usd), 49.0);
        assert_eq!(PREMIUM_PLAN.price(Currency::Inr), 3999.0);
        assert_eq!(PREMIUM_PLAN.price_label(Currency::Usd), "$49");
        assert_eq!(PREMIUM_PLAN.price_label(Currency::Inr), "₹3,999");
    }

    #[test]
    fn freemium_is_free_everywhere() {
        assert_eq!(FREEMIUM_PLAN.price_label(Currency::Usd), "$0");
        assert_eq!(FREEMIUM_PLAN.price_label(Currency::Inr), "₹0");
    }

    #[test]
    fn currency_parses_case_insensitively() {
        assert_eq!("inr".parse::<Currency>().unwrap(), Currency::Inr);
        assert!("EUR".parse::<Currency>().is_err());
    }

    #[test]
    fn payment_method_serializes_uppercase() {
        let json = serde_json::to_string(&PaymentMethod::Razorpay).unwrap();
        assert_eq!(json, "\"RAZORPAY\"");
    }
}
