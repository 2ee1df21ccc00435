//! Inline fixture parsing.

use anyhow::{Context, Result};
use traceplay_types::RawEvent;

/// Parse a JSONL session log into raw events. Blank lines are skipped.
pub fn parse_jsonl_log(jsonl: &str) -> Result<Vec<RawEvent>> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("malformed log line {}", i + 1))
        })
        .collect()
}
