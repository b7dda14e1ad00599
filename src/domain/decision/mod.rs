//! Decision module - submissions, analysis reports and history.

mod analysis;
mod history;
mod request;

pub use analysis::{AnalysisResult, ScenarioOutlook, BIAS_ALERT_THRESHOLD};
pub use history::{sort_newest_first, HistoryRecord};
pub use request::{Conviction, DecisionAction, DecisionForm, DecisionRequest, Timeframe};
