//! Decision submission - the form a user fills in before analysis.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{UserId, ValidationError};

/// Intended action on the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionAction {
    #[default]
    Buy,
    Sell,
    Exit,
    Hold,
}

impl DecisionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionAction::Buy => "BUY",
            DecisionAction::Sell => "SELL",
            DecisionAction::Exit => "EXIT",
            DecisionAction::Hold => "HOLD",
        }
    }

    /// Long description shown next to the option.
    pub fn description(&self) -> &'static str {
        match self {
            DecisionAction::Buy => "BUY / ACCUMULATE",
            DecisionAction::Sell => "SELL / REDUCE",
            DecisionAction::Exit => "FULL EXIT",
            DecisionAction::Hold => "HOLD / MONITOR",
        }
    }
}

impl fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(DecisionAction::Buy),
            "SELL" => Ok(DecisionAction::Sell),
            "EXIT" => Ok(DecisionAction::Exit),
            "HOLD" => Ok(DecisionAction::Hold),
            other => Err(ValidationError::invalid_format(
                "action",
                format!("'{}' is not one of BUY, SELL, EXIT, HOLD", other),
            )),
        }
    }
}

/// Time horizon of the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Timeframe {
    Scalp,
    Swing,
    #[default]
    MidTerm,
    LongTerm,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Scalp => "SCALP",
            Timeframe::Swing => "SWING",
            Timeframe::MidTerm => "MID_TERM",
            Timeframe::LongTerm => "LONG_TERM",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Timeframe::Scalp => "SCALP (MINUTES/HOURS)",
            Timeframe::Swing => "SWING (DAYS/WEEKS)",
            Timeframe::MidTerm => "MID-TERM (MONTHS)",
            Timeframe::LongTerm => "LONG-TERM (YEARS)",
        }
    }
}

impl FromStr for Timeframe {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "SCALP" => Ok(Timeframe::Scalp),
            "SWING" => Ok(Timeframe::Swing),
            "MID_TERM" => Ok(Timeframe::MidTerm),
            "LONG_TERM" => Ok(Timeframe::LongTerm),
            other => Err(ValidationError::invalid_format(
                "timeframe",
                format!("'{}' is not one of SCALP, SWING, MID_TERM, LONG_TERM", other),
            )),
        }
    }
}

/// Conviction level on a 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conviction(u8);

impl Conviction {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if !(Self::MIN as i32..=Self::MAX as i32).contains(&value) {
            return Err(ValidationError::out_of_range(
                "conviction",
                Self::MIN as i32,
                Self::MAX as i32,
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Conviction {
    fn default() -> Self {
        Self(5)
    }
}

/// Raw form input, as typed by the user.
#[derive(Debug, Clone)]
pub struct DecisionForm {
    pub asset: String,
    pub action: DecisionAction,
    pub reasoning: String,
    pub timeframe: Timeframe,
    pub conviction: i32,
}

impl Default for DecisionForm {
    fn default() -> Self {
        Self {
            asset: String::new(),
            action: DecisionAction::default(),
            reasoning: String::new(),
            timeframe: Timeframe::default(),
            conviction: Conviction::default().value() as i32,
        }
    }
}

impl DecisionForm {
    /// Validates required fields and ranges.
    pub fn validate(&self) -> Result<DecisionRequest, ValidationError> {
        let asset = self.asset.trim();
        if asset.is_empty() {
            return Err(ValidationError::empty_field("asset"));
        }
        let reasoning = self.reasoning.trim();
        if reasoning.is_empty() {
            return Err(ValidationError::empty_field("reasoning"));
        }
        Ok(DecisionRequest {
            asset: asset.to_string(),
            action: self.action,
            reasoning: reasoning.to_string(),
            timeframe: self.timeframe,
            conviction: Conviction::new(self.conviction)?,
            user_id: None,
        })
    }
}

/// A validated decision, ready to submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRequest {
    pub asset: String,
    pub action: DecisionAction,
    pub reasoning: String,
    pub timeframe: Timeframe,
    pub conviction: Conviction,
    /// Submitting user; sent as `null` when unknown.
    pub user_id: Option<UserId>,
}

impl DecisionRequest {
    pub fn with_user(self, user_id: Option<UserId>) -> Self {
        Self { user_id, ..self }
    }
}
