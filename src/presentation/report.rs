//! Analysis report rendering.

use super::RULE;
use crate::domain::decision::AnalysisResult;

/// Renders a decision analysis report.
///
/// Scores under the alert threshold lead with the headline bias.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    // Score
    out.push_str(&format!("DECISION QUALITY SCORE: {}/100\n", result.display_score()));
    if result.is_bias_alert() {
        out.push_str(&format!("!! BIAS ALERT: {}\n", result.primary_bias()));
    } else {
        out.push_str("STATUS: OPERATIONAL\n");
    }
    out.push_str(RULE);
    out.push('\n');

    // Summary
    out.push_str("DECISION_SUMMARY\n");
    out.push_str(&format!("  {}\n\n", result.summary));

    if !result.assumptions.is_empty() {
        out.push_str("ASSUMPTIONS\n");
        for assumption in &result.assumptions {
            out.push_str(&format!("  - {}\n", assumption));
        }
        out.push('\n');
    }

    if result.biases.len() > 1 {
        out.push_str("PSYCHOLOGICAL_ANALYSIS\n");
        for bias in &result.biases {
            out.push_str(&format!("  - {}\n", bias));
        }
        out.push('\n');
    }

    // Risks
    out.push_str("HIDDEN_RISKS\n");
    if result.risks.is_empty() {
        out.push_str("  (none reported)\n");
    }
    for risk in &result.risks {
        out.push_str(&format!("  - {}\n", risk));
    }
    out.push('\n');

    // Scenarios
    out.push_str("SCENARIO_SIMULATION\n");
    out.push_str(&format!("  BULL: {}\n", result.scenarios.bull));
    out.push_str(&format!("  BASE: {}\n", result.scenarios.base));
    out.push_str(&format!("  BEAR: {}\n\n", result.scenarios.bear));

    if let Some(guidance) = &result.guidance {
        out.push_str(&format!("GUIDANCE\n  {}\n\n", guidance));
    }

    out.push_str("REFLECTION_PROMPT\n");
    out.push_str(&format!("  {}\n", result.prompt));

    if let Some(credits) = result.user_credits {
        out.push_str(&format!("\nCREDITS REMAINING: {}\n", credits));
    }
    out
}

/// Upsell shown when analysis credits are exhausted.
pub fn render_upgrade_prompt(detail: &str) -> String {
    format!(
        "{}\nUpgrade to PREMIUM_LAYER: prism subscribe --currency USD|INR\n",
        detail
    )
}
