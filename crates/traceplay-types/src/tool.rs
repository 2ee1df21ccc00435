use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Final status of a tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    /// Start event seen, no matching result in the log yet.
    Running,
    Complete,
    Error,
}

/// One tool invocation, reconstructed from a paired start/result event.
///
/// Invariant: `duration_ms` is present iff `status` is `Complete` or
/// `Error`, and is always >= 0 (out-of-order timestamps are clamped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Tool-call identifier shared by the start and result events.
    pub id: String,
    pub tool: String,
    pub input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    pub status: ToolStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Start event timestamp, milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Human-relative offset from session start, e.g. `1:05`.
    pub time_offset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-tool invocation count, used in the stats breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolUsage {
    pub tool: String,
    pub count: usize,
}

/// Summary counters over a list of tool-call records.
///
/// Duration figures only cover records that finished (running calls carry
/// no duration). `avg_duration_ms` is `0.0` when no record finished.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCallStats {
    pub total_calls: usize,
    pub error_count: usize,
    pub avg_duration_ms: f64,
    pub total_duration_ms: u64,
    /// Sorted descending by count; ties keep first-seen order.
    pub tool_breakdown: Vec<ToolUsage>,
}
