//! Analysis report returned for a submitted decision.
//!
//! Every field defaults, so a partial payload still renders. What the client
//! must never do is invent a report when the request failed; there is no
//! constructor here for a placeholder result.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::null_as_default;

/// Score below which the report raises a bias alert.
pub const BIAS_ALERT_THRESHOLD: f64 = 70.0;

const NO_BIAS: &str = "No critical bias detected.";

/// Bull/base/bear narrative scenarios.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioOutlook {
    #[serde(deserialize_with = "null_as_default")]
    pub bull: String,
    #[serde(deserialize_with = "null_as_default")]
    pub base: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bear: String,
}

/// Decision analysis report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub assumptions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub biases: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub risks: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub scenarios: ScenarioOutlook,
    /// Decision quality score, nominally 0-100.
    #[serde(deserialize_with = "null_as_default")]
    pub score: f64,
    pub guidance: Option<String>,
    /// Reflection prompt.
    #[serde(deserialize_with = "null_as_default")]
    pub prompt: String,
    /// Credits left after this analysis, when the backend reports it.
    pub user_credits: Option<i64>,
}

impl AnalysisResult {
    /// Score clamped to the 0-100 display range.
    pub fn display_score(&self) -> u8 {
        if self.score.is_nan() {
            return 0;
        }
        self.score.clamp(0.0, 100.0).round() as u8
    }

    /// True when the report should be presented as a bias alert.
    pub fn is_bias_alert(&self) -> bool {
        self.score < BIAS_ALERT_THRESHOLD
    }

    /// The headline bias, or the "nothing detected" message.
    pub fn primary_bias(&self) -> &str {
        self.biases.first().map(String::as_str).unwrap_or(NO_BIAS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_payload() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "summary": "Analyzing BUY decision for NVDA.",
            "biases": ["Recency Bias"],
            "risks": ["Volatility"],
            "scenarios": {"bull": "up", "base": "flat", "bear": "down"},
            "score": 60,
            "prompt": "What breaks this?",
            "user_credits": 3
        }))
        .unwrap();
        assert_eq!(result.user_credits, Some(3));
        assert_eq!(result.scenarios.bear, "down");
        assert!(result.is_bias_alert());
        assert_eq!(result.primary_bias(), "Recency Bias");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let result: AnalysisResult = serde_json::from_value(json!({"score": 80})).unwrap();
        assert!(result.biases.is_empty());
        assert_eq!(result.primary_bias(), "No critical bias detected.");
        assert!(result.user_credits.is_none());
        assert!(!result.is_bias_alert());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let result: AnalysisResult =
            serde_json::from_value(json!({"summary": "s", "novel": [1, 2]})).unwrap();
        assert_eq!(result.summary, "s");
    }

    #[test]
    fn null_fields_still_render_and_keep_credits() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "summary": null,
            "biases": null,
            "risks": ["Liquidity"],
            "scenarios": {"bull": null, "base": "flat", "bear": null},
            "score": null,
            "prompt": null,
            "user_credits": 3
        }))
        .unwrap();
        assert_eq!(result.user_credits, Some(3));
        assert_eq!(result.prompt, "");
        assert_eq!(result.scenarios.base, "flat");
        assert_eq!(result.display_score(), 0);
        assert_eq!(result.primary_bias(), "No critical bias detected.");
    }

    #[test]
    fn null_scenarios_block_reads_as_empty() {
        let result: AnalysisResult =
            serde_json::from_value(json!({"scenarios": null, "summary": "s"})).unwrap();
        assert_eq!(result.scenarios, ScenarioOutlook::default());
    }

    #[test]
    fn display_score_is_clamped() {
        let mut result = AnalysisResult {
            score: 140.0,
            ..Default::default()
        };
        assert_eq!(result.display_score(), 100);
        result.score = -5.0;
        assert_eq!(result.display_score(), 0);
        result.score = 74.6;
        assert_eq!(result.display_score(), 75);
    }

    proptest::proptest! {
        #[test]
        fn display_score_stays_in_range(score in proptest::num::f64::ANY) {
            let result = AnalysisResult {
                score,
                ..Default::default()
            };
            proptest::prop_assert!(result.display_score() <= 100);
        }
    }
}
