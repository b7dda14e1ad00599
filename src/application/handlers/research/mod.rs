//! Research handlers.

mod analyze_chart;

pub use analyze_chart::{AnalyzeChartCommand, AnalyzeChartHandler, ResearchError};
