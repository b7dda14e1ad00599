//! Shell chrome: splash, landing, header and navigation.

use super::RULE;
use crate::domain::session::Identity;
use crate::domain::shell::Tab;

/// Shown while the session store is still loading.
pub fn render_splash() -> String {
    String::from("PRISM // INITIALIZING...\n")
}

/// Public landing page with the sign-in hint.
pub fn render_landing() -> String {
    let mut out = String::new();
    out.push_str("PRISM\n");
    out.push_str("DECISION INTELLIGENCE\n\n");
    out.push_str("[BEHAVIORAL_ANALYSIS] [RISK_DETECTION] [SCENARIO_SIMULATION]\n\n");
    out.push_str("Initialize system: prism login --email <email> --password <password>\n");
    out.push_str("INCLUDES 5 FREE INTELLIGENCE REPORTS\n");
    out
}

/// Header line: who is signed in, their tier and remaining credits.
pub fn render_header(identity: &Identity) -> String {
    let credits = match identity.credits {
        Some(n) => n.to_string(),
        None => "-".to_string(),
    };
    format!(
        "PRISM | {} | {} | CREDITS: {}\n{}\n",
        identity.display_email(),
        identity.tier(),
        credits,
        RULE
    )
}

/// Tab strip with the active tab bracketed.
pub fn render_nav(active: Tab) -> String {
    let labels: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect();
    format!("{}\n", labels.join("  "))
}
