//! Subscription tier definitions.
//!
//! Represents the subscription tier levels the backend reports on an identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription tier.
///
/// The identity record carries the tier as a raw string; this enum is the
/// client's reading of it. Unrecognized values are treated as the free tier so
/// an unexpected backend value never unlocks premium-only UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionTier {
    /// Free tier with a small allotment of analysis credits.
    Freemium,

    /// Paid annual tier.
    Premium,
}

impl SubscriptionTier {
    /// Reads a backend `subscription_status` value.
    pub fn from_status(status: &str) -> Self {
        if status.eq_ignore_ascii_case("PREMIUM") {
            SubscriptionTier::Premium
        } else {
            SubscriptionTier::Freemium
        }
    }

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        matches!(self, SubscriptionTier::Premium)
    }

    /// Wire value as stored on the identity.
    pub fn as_status(&self) -> &'static str {
        match self {
            SubscriptionTier::Freemium => "FREEMIUM",
            SubscriptionTier::Premium => "PREMIUM",
        }
    }
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        SubscriptionTier::Freemium
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_status())
    }
}
