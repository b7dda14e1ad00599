//! Vision analysis rendering.

use crate::domain::research::VisionReport;

const BAR_WIDTH: usize = 20;

/// Renders a chart analysis: confidence, scenario bars, structural logic.
pub fn render_vision(report: &VisionReport) -> String {
    let analysis = &report.analysis;
    let mut out = String::new();

    out.push_str(&format!(
        "VISION_CONFIDENCE: {}%\n",
        analysis.confidence_score.round()
    ));
    if let Some(asset) = &analysis.asset_detected {
        out.push_str(&format!("ASSET: {}\n", asset));
    }
    if let Some(trend) = &analysis.primary_trend {
        out.push_str(&format!("PRIMARY_TREND: {}\n", trend));
    }
    out.push('\n');

    out.push_str("SCENARIO_PROBABILITY\n");
    for scenario in analysis.ranked_scenarios() {
        let percent = scenario.bar_percent();
        let filled = usize::from(percent) * BAR_WIDTH / 100;
        out.push_str(&format!(
            "  {:<5} {}{} {:>3}%\n",
            scenario.name,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            percent
        ));
        if !scenario.logic.is_empty() {
            out.push_str(&format!("        {}\n", scenario.logic));
        }
    }

    if !analysis.structural_logic.is_empty() {
        out.push_str("\nSTRUCTURAL_LOGIC\n");
        for observation in &analysis.structural_logic {
            out.push_str(&format!("  {}: {}\n", observation.title, observation.content));
        }
    }
    out
}
