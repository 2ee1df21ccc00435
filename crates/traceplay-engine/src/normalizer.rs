//! Event log normalization.
//!
//! Maps a raw, loosely-structured event log into an ordered list of
//! [`DisplayEntry`] values. Paired tool start/result events consolidate into
//! a single `tool` entry emitted at the result's position in the log, so
//! output order is filtered input order; consolidation removes entries but
//! never reorders them.

use crate::diagnostics::{Diagnostic, Diagnostics, TracingSink};
use crate::schema::{self, EventClass, ToolResultFields, ToolStartFields, UNKNOWN_TOOL};
use serde_json::Value;
use std::collections::HashMap;
use traceplay_types::{
    DisplayEntry, EntryKind, RawEvent, ToolCallView, ToolStatus, format_offset,
};

/// Normalize a raw event log into display entries.
///
/// Pure and total: malformed events degrade into best-effort entries or are
/// skipped, never an error. Diagnostics go to the default tracing sink; use
/// [`normalize_with`] to capture or suppress them.
pub fn normalize(events: &[RawEvent], session_start_ms: i64) -> Vec<DisplayEntry> {
    normalize_with(events, session_start_ms, &mut TracingSink)
}

/// [`normalize`] with an injected diagnostics observer.
pub fn normalize_with(
    events: &[RawEvent],
    session_start_ms: i64,
    diagnostics: &mut dyn Diagnostics,
) -> Vec<DisplayEntry> {
    // Pre-scan: pair tool starts and results by call id. First occurrence
    // wins so duplicate ids cannot re-pair later events.
    let mut starts: HashMap<String, (&RawEvent, ToolStartFields)> = HashMap::new();
    let mut results: HashMap<String, &RawEvent> = HashMap::new();
    for event in events {
        match schema::classify(event) {
            EventClass::ToolStart(fields) => {
                if let Some(id) = fields.call_id.clone() {
                    starts.entry(id).or_insert((event, fields));
                }
            }
            EventClass::ToolResult(fields) => {
                if let Some(id) = fields.call_id {
                    results.entry(id).or_insert(event);
                }
            }
            _ => {}
        }
    }

    let mut entries = Vec::new();
    for event in events {
        let time_offset = format_offset(event.timestamp - session_start_ms);

        match schema::classify(event) {
            EventClass::Message(kind) => {
                entries.push(message_entry(event, kind, time_offset));
            }

            EventClass::Status => {
                entries.push(startup_entry(
                    event,
                    time_offset,
                    schema::status_content(&event.data),
                ));
            }

            EventClass::Unknown => {
                entries.push(startup_entry(
                    event,
                    time_offset,
                    schema::serialize_payload(&event.data),
                ));
            }

            // Streaming deltas are too frequent to display.
            EventClass::TokenDelta => {}

            EventClass::ToolStart(fields) => {
                // A paired result will emit the consolidated entry; only an
                // unpaired (or unpairable) start shows up as running.
                let paired = fields
                    .call_id
                    .as_ref()
                    .is_some_and(|id| results.contains_key(id));
                if !paired {
                    entries.push(running_entry(event, fields, time_offset));
                }
            }

            EventClass::ToolResult(fields) => {
                let started = fields.call_id.as_ref().and_then(|id| starts.get(id));
                entries.push(result_entry(
                    event,
                    fields,
                    started,
                    time_offset,
                    session_start_ms,
                    diagnostics,
                ));
            }
        }
    }

    entries
}

fn message_entry(event: &RawEvent, kind: EntryKind, time_offset: String) -> DisplayEntry {
    let (model, usage) = if kind == EntryKind::Assistant {
        (
            schema::model(&event.data),
            schema::token_usage(&event.data),
        )
    } else {
        (None, None)
    };

    DisplayEntry {
        id: event.id.clone(),
        kind,
        timestamp: event.timestamp,
        time_offset,
        content: schema::message_content(&event.data),
        tool_call: None,
        model,
        usage,
        is_startup: false,
    }
}

fn startup_entry(event: &RawEvent, time_offset: String, content: String) -> DisplayEntry {
    DisplayEntry {
        id: event.id.clone(),
        kind: EntryKind::System,
        timestamp: event.timestamp,
        time_offset,
        content,
        tool_call: None,
        model: None,
        usage: None,
        is_startup: true,
    }
}

fn running_entry(event: &RawEvent, fields: ToolStartFields, time_offset: String) -> DisplayEntry {
    let tool = fields.tool.unwrap_or_else(|| UNKNOWN_TOOL.to_string());

    DisplayEntry {
        id: event.id.clone(),
        kind: EntryKind::Tool,
        timestamp: event.timestamp,
        time_offset: time_offset.clone(),
        content: tool.clone(),
        tool_call: Some(ToolCallView {
            tool,
            input: fields.input,
            output: None,
            status: ToolStatus::Running,
            duration_ms: None,
            start_offset: time_offset,
            error: None,
        }),
        model: None,
        usage: None,
        is_startup: false,
    }
}

fn result_entry(
    event: &RawEvent,
    fields: ToolResultFields,
    started: Option<&(&RawEvent, ToolStartFields)>,
    time_offset: String,
    session_start_ms: i64,
    diagnostics: &mut dyn Diagnostics,
) -> DisplayEntry {
    // Prefer the result payload's name; the paired start is the fallback.
    let tool = fields
        .tool
        .or_else(|| started.and_then(|(_, f)| f.tool.clone()))
        .unwrap_or_else(|| UNKNOWN_TOOL.to_string());

    let input = match started {
        Some((_, f)) => f.input.clone(),
        None => fields.input.unwrap_or(Value::Null),
    };

    // A result with no start keeps its own timing: start offset repeats the
    // result offset and the duration reads as 0.
    let (duration_ms, start_offset) = match started {
        Some((start, _)) => {
            let delta = event.timestamp - start.timestamp;
            if delta < 0 {
                diagnostics.report(Diagnostic::NegativeDuration {
                    call_id: fields.call_id.clone().unwrap_or_default(),
                    delta_ms: delta,
                });
            }
            (
                delta.max(0) as u64,
                format_offset(start.timestamp - session_start_ms),
            )
        }
        None => (0, time_offset.clone()),
    };

    let status = if fields.is_error {
        ToolStatus::Error
    } else {
        ToolStatus::Complete
    };

    DisplayEntry {
        id: event.id.clone(),
        kind: EntryKind::Tool,
        timestamp: event.timestamp,
        time_offset,
        content: tool.clone(),
        tool_call: Some(ToolCallView {
            tool,
            input,
            output: fields.output,
            status,
            duration_ms: Some(duration_ms),
            start_offset,
            error: fields.error,
        }),
        model: None,
        usage: None,
        is_startup: false,
    }
}
