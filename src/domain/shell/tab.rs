//! Authenticated view tabs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Tab selected inside the authenticated shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Decision form and analysis report.
    #[default]
    Overview,
    /// Past decisions.
    History,
    /// Chart image vision analysis.
    Research,
    /// Plans and upgrade.
    Pricing,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::History, Tab::Research, Tab::Pricing];

    /// Navigation label.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "DASHBOARD",
            Tab::History => "MEMORY",
            Tab::Research => "RESEARCH",
            Tab::Pricing => "UPGRADE",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" | "dashboard" => Ok(Tab::Overview),
            "history" | "memory" => Ok(Tab::History),
            "research" => Ok(Tab::Research),
            "pricing" | "upgrade" => Ok(Tab::Pricing),
            other => Err(ValidationError::invalid_format(
                "tab",
                format!("unknown tab '{}'", other),
            )),
        }
    }
}
