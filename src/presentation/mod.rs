//! Presentation - plain-text renderers for each screen.
//!
//! Renderers are pure functions from domain values to strings. The binary
//! prints them to stdout; logs go to stderr.

mod chrome;
mod history;
mod pricing;
mod report;
mod research;

pub use chrome::{render_header, render_landing, render_nav, render_splash};
pub use history::render_history;
pub use pricing::{render_pricing, render_receipt};
pub use report::{render_report, render_upgrade_prompt};
pub use research::render_vision;

const RULE: &str = "────────────────────────────────────────";
