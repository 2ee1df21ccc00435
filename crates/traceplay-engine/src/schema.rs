// Schema translation from raw provider data to canonical event classes
//
// Two historical tag generations name the same semantic events: legacy bare
// tags ("tool:start") and "agent-runtime:"-prefixed tags with renamed payload
// fields. Both are translated here, once, into a single field set; the
// normalizer and reconciler share the result and never branch per generation.

use serde_json::Value;
use traceplay_types::{EntryKind, RawEvent, TokenUsage};

/// Placeholder used when no payload field yields a tool name.
pub(crate) const UNKNOWN_TOOL: &str = "unknown";

// Newer field names first, legacy fallbacks after.
const CALL_ID_FIELDS: &[&str] = &["toolCallId", "toolId", "id"];
const TOOL_NAME_FIELDS: &[&str] = &["toolName", "tool"];
const OUTPUT_FIELDS: &[&str] = &["output", "result"];
const CONTENT_FIELDS: &[&str] = &["content", "message", "text"];
const STATUS_FIELDS: &[&str] = &["status", "content", "message", "text"];

/// Canonical classification of a raw event.
#[derive(Debug, Clone)]
pub(crate) enum EventClass {
    /// Plain system/user/assistant message.
    Message(EntryKind),
    ToolStart(ToolStartFields),
    ToolResult(ToolResultFields),
    /// Pre-activity status update, collapsed as startup noise.
    Status,
    /// High-frequency streaming token delta, dropped from the timeline.
    TokenDelta,
    Unknown,
}

#[derive(Debug, Clone)]
pub(crate) struct ToolStartFields {
    pub call_id: Option<String>,
    pub tool: Option<String>,
    pub input: Value,
}

#[derive(Debug, Clone)]
pub(crate) struct ToolResultFields {
    pub call_id: Option<String>,
    pub tool: Option<String>,
    pub output: Option<Value>,
    /// Some providers echo the input on the result.
    pub input: Option<Value>,
    pub error: Option<String>,
    pub is_error: bool,
}

pub(crate) fn classify(event: &RawEvent) -> EventClass {
    let tag = event
        .event_type
        .strip_prefix("agent-runtime:")
        .unwrap_or(&event.event_type);

    match tag {
        "system" => EventClass::Message(EntryKind::System),
        "user" => EventClass::Message(EntryKind::User),
        "assistant" => EventClass::Message(EntryKind::Assistant),
        "tool:start" | "tool-start" => EventClass::ToolStart(tool_start_fields(&event.data)),
        "tool:result" | "tool-result" => EventClass::ToolResult(tool_result_fields(&event.data)),
        "status" => EventClass::Status,
        "token:delta" | "token-delta" => EventClass::TokenDelta,
        _ => EventClass::Unknown,
    }
}

fn tool_start_fields(data: &Value) -> ToolStartFields {
    ToolStartFields {
        call_id: str_field(data, CALL_ID_FIELDS),
        tool: str_field(data, TOOL_NAME_FIELDS),
        input: data.get("input").cloned().unwrap_or(Value::Null),
    }
}

fn tool_result_fields(data: &Value) -> ToolResultFields {
    let error = str_field(data, &["error"]);
    let is_error = error.is_some()
        || bool_field(data, "isError")
        || bool_field(data, "is_error");

    ToolResultFields {
        call_id: str_field(data, CALL_ID_FIELDS),
        tool: str_field(data, TOOL_NAME_FIELDS),
        output: value_field(data, OUTPUT_FIELDS),
        input: data.get("input").cloned(),
        error,
        is_error,
    }
}

/// First non-empty string among the named fields.
pub(crate) fn str_field(data: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| data.get(*name).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn value_field(data: &Value, names: &[&str]) -> Option<Value> {
    names
        .iter()
        .find_map(|name| data.get(*name))
        .filter(|v| !v.is_null())
        .cloned()
}

fn bool_field(data: &Value, name: &str) -> bool {
    data.get(name).and_then(Value::as_bool).unwrap_or(false)
}

/// Message body for system/user/assistant entries, empty string default.
pub(crate) fn message_content(data: &Value) -> String {
    str_field(data, CONTENT_FIELDS).unwrap_or_default()
}

/// Body for status updates; falls back to the serialized payload.
pub(crate) fn status_content(data: &Value) -> String {
    str_field(data, STATUS_FIELDS).unwrap_or_else(|| serialize_payload(data))
}

pub(crate) fn model(data: &Value) -> Option<String> {
    str_field(data, &["model"])
}

/// Token usage attached to assistant events (camelCase, snake_case fallback).
pub(crate) fn token_usage(data: &Value) -> Option<TokenUsage> {
    let usage = data.get("usage")?;
    let field = |camel: &str, snake: &str| -> u64 {
        usage
            .get(camel)
            .or_else(|| usage.get(snake))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };

    let input_tokens = field("inputTokens", "input_tokens");
    let output_tokens = field("outputTokens", "output_tokens");
    let mut total_tokens = field("totalTokens", "total_tokens");
    if total_tokens == 0 {
        total_tokens = input_tokens + output_tokens;
    }

    Some(TokenUsage {
        input_tokens,
        output_tokens,
        total_tokens,
    })
}

/// Serialize an unknown payload as display text.
pub(crate) fn serialize_payload(data: &Value) -> String {
    match data {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
