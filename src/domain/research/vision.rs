//! Vision analysis of an uploaded chart.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::null_as_default;

/// One probabilistic scenario read from the chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionScenario {
    /// BULL, BASE or BEAR.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Probability in percent.
    #[serde(deserialize_with = "null_as_default")]
    pub probability: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub logic: String,
}

impl VisionScenario {
    /// Probability clamped to 0-100 for bar rendering.
    pub fn bar_percent(&self) -> u8 {
        if self.probability.is_nan() {
            return 0;
        }
        self.probability.clamp(0.0, 100.0).round() as u8
    }
}

/// A structural observation (volume profile, price action, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralObservation {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

/// Analysis payload for a chart image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionAnalysis {
    pub asset_detected: Option<String>,
    pub primary_trend: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub scenarios: Vec<VisionScenario>,
    #[serde(deserialize_with = "null_as_default")]
    pub structural_logic: Vec<StructuralObservation>,
    #[serde(deserialize_with = "null_as_default")]
    pub confidence_score: f64,
}

impl VisionAnalysis {
    /// Scenarios ordered by probability, most likely first.
    pub fn ranked_scenarios(&self) -> Vec<&VisionScenario> {
        let mut ranked: Vec<&VisionScenario> = self.scenarios.iter().collect();
        ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        ranked
    }

    pub fn dominant_scenario(&self) -> Option<&VisionScenario> {
        self.ranked_scenarios().into_iter().next()
    }
}

/// Envelope returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionReport {
    pub status: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub analysis: VisionAnalysis,
}
