//! Research module - chart uploads and vision analysis.

mod chart;
mod vision;

pub use chart::ChartImage;
pub use vision::{StructuralObservation, VisionAnalysis, VisionReport, VisionScenario};
