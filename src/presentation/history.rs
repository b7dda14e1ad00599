//! History list rendering.

use crate::domain::decision::HistoryRecord;

const REASONING_WIDTH: usize = 60;

pub fn render_history(records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return String::from("MEMORY: no decisions recorded yet.\n");
    }

    let mut out = format!("MEMORY ({} decisions)\n\n", records.len());
    for record in records {
        let marker = if record.is_accumulating() { "+" } else { "-" };
        let date = record
            .created_at
            .map(|t| t.to_date_string())
            .unwrap_or_else(|| "----------".to_string());
        out.push_str(&format!(
            "{} {} {}  {}\n",
            marker,
            record.action.to_uppercase(),
            record.asset,
            date
        ));
        out.push_str(&format!("    {}\n", record.reasoning_line(REASONING_WIDTH)));
        if let Some(level) = record.conviction_level {
            out.push_str(&format!("    CONVICTION: {}/10\n", level));
        }
        out.push('\n');
    }
    out
}
