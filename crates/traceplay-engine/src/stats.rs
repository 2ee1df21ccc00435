//! Summary statistics over reconciled tool-call records.

use traceplay_types::{ToolCallRecord, ToolCallStats, ToolStatus, ToolUsage};

/// Reduce tool-call records into summary counters. Pure, O(n).
///
/// Duration figures only cover records that finished; the average is `0.0`
/// (never NaN) when no record carries a duration.
pub fn aggregate(records: &[ToolCallRecord]) -> ToolCallStats {
    let total_calls = records.len();
    let error_count = records
        .iter()
        .filter(|r| r.status == ToolStatus::Error)
        .count();

    let durations: Vec<u64> = records.iter().filter_map(|r| r.duration_ms).collect();
    let total_duration_ms: u64 = durations.iter().sum();
    let avg_duration_ms = if durations.is_empty() {
        0.0
    } else {
        total_duration_ms as f64 / durations.len() as f64
    };

    // Count per tool in first-seen order; the stable sort keeps that order
    // for equal counts.
    let mut tool_breakdown: Vec<ToolUsage> = Vec::new();
    for record in records {
        match tool_breakdown.iter_mut().find(|u| u.tool == record.tool) {
            Some(usage) => usage.count += 1,
            None => tool_breakdown.push(ToolUsage {
                tool: record.tool.clone(),
                count: 1,
            }),
        }
    }
    tool_breakdown.sort_by(|a, b| b.count.cmp(&a.count));

    ToolCallStats {
        total_calls,
        error_count,
        avg_duration_ms,
        total_duration_ms,
        tool_breakdown,
    }
}
