use crate::tool::ToolStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display role of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    System,
    User,
    Assistant,
    Tool,
}

/// Token usage attached to an assistant entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

/// Tool invocation details embedded in a consolidated `tool` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallView {
    pub tool: String,
    pub input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    pub status: ToolStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Offset of the start event. For a result with no matching start this
    /// repeats the result's own offset.
    pub start_offset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One displayable unit of the normalized timeline.
///
/// Created once per normalization pass and never mutated; the full list is
/// recomputed whenever the source log changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayEntry {
    /// ID of the raw event this entry was built from (the result event for
    /// consolidated tool entries).
    pub id: String,
    pub kind: EntryKind,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Human-relative offset from session start.
    pub time_offset: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCallView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Pre-activity noise (status updates, unrecognized events); the
    /// presentation layer collapses these out of the main timeline.
    #[serde(default)]
    pub is_startup: bool,
}
