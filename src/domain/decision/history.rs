//! Historical decision records.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::{null_as_default, Timestamp};

/// A past decision as listed on the history view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub asset: String,
    /// Kept as the raw string; older records predate the action enum.
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reasoning: String,
    pub conviction_level: Option<i64>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    pub timeframe: Option<String>,
    pub emotional_tone: Option<String>,
}

impl HistoryRecord {
    /// Whether the action reads as accumulating (rendered as positive).
    pub fn is_accumulating(&self) -> bool {
        self.action.eq_ignore_ascii_case("BUY")
    }

    /// First line of the reasoning, truncated for list display.
    pub fn reasoning_line(&self, max_chars: usize) -> String {
        let line = self.reasoning.lines().next().unwrap_or_default();
        if line.chars().count() <= max_chars {
            return line.to_string();
        }
        let mut out: String = line.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Orders records newest first; undated records sink to the bottom.
pub fn sort_newest_first(records: &mut [HistoryRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Timestamp>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Timestamp::parse))
}
