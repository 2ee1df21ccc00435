//! Tool-call reconciliation.
//!
//! Re-scans the raw log independently of the display timeline: downstream
//! statistics need every invocation exactly once, including running calls
//! the normalizer consolidates away.

use crate::diagnostics::{Diagnostic, Diagnostics, TracingSink};
use crate::schema::{self, EventClass, ToolResultFields, ToolStartFields, UNKNOWN_TOOL};
use std::collections::{HashMap, HashSet};
use traceplay_types::{RawEvent, ToolCallRecord, ToolStatus, format_offset};

/// Extract one [`ToolCallRecord`] per valid tool-start event.
///
/// Pure and total: invalid payloads are dropped with a diagnostic, orphan
/// results are logged and produce no record. Output is sorted ascending by
/// start timestamp. Diagnostics go to the default tracing sink; use
/// [`reconcile_with`] to capture or suppress them.
pub fn reconcile(events: &[RawEvent], session_start_ms: i64) -> Vec<ToolCallRecord> {
    reconcile_with(events, session_start_ms, &mut TracingSink)
}

/// [`reconcile`] with an injected diagnostics observer.
pub fn reconcile_with(
    events: &[RawEvent],
    session_start_ms: i64,
    diagnostics: &mut dyn Diagnostics,
) -> Vec<ToolCallRecord> {
    // Validated starts in log order (keeps the final sort deterministic for
    // equal timestamps) and results keyed by call id.
    let mut starts: Vec<(String, &RawEvent, ToolStartFields)> = Vec::new();
    let mut seen_starts: HashSet<String> = HashSet::new();
    let mut results: HashMap<String, (&RawEvent, ToolResultFields)> = HashMap::new();

    for event in events {
        match schema::classify(event) {
            EventClass::ToolStart(fields) => {
                let Some(call_id) = validate(event, &fields.call_id, diagnostics) else {
                    continue;
                };
                // Duplicate start ids keep the first occurrence.
                if seen_starts.insert(call_id.clone()) {
                    starts.push((call_id, event, fields));
                }
            }
            EventClass::ToolResult(fields) => {
                let Some(call_id) = validate(event, &fields.call_id, diagnostics) else {
                    continue;
                };
                results.entry(call_id).or_insert((event, fields));
            }
            _ => {}
        }
    }

    let mut records: Vec<ToolCallRecord> = starts
        .iter()
        .map(|(call_id, start, fields)| {
            build_record(call_id, start, fields, results.get(call_id), session_start_ms, diagnostics)
        })
        .collect();

    // Results whose start never appeared are diagnostic-only: a record
    // requires an originating start.
    for call_id in results.keys() {
        if !seen_starts.contains(call_id) {
            diagnostics.report(Diagnostic::OrphanResult {
                call_id: call_id.clone(),
            });
        }
    }

    records.sort_by_key(|r| r.timestamp);
    records
}

/// Payload validation: a non-array object carrying a non-empty string id.
fn validate(
    event: &RawEvent,
    call_id: &Option<String>,
    diagnostics: &mut dyn Diagnostics,
) -> Option<String> {
    if !event.data.is_object() {
        diagnostics.report(Diagnostic::MalformedPayload {
            event_id: event.id.clone(),
            reason: "payload is not an object".to_string(),
        });
        return None;
    }
    match call_id {
        Some(id) => Some(id.clone()),
        None => {
            diagnostics.report(Diagnostic::MalformedPayload {
                event_id: event.id.clone(),
                reason: "missing tool call id".to_string(),
            });
            None
        }
    }
}

fn build_record(
    call_id: &str,
    start: &RawEvent,
    fields: &ToolStartFields,
    result: Option<&(&RawEvent, ToolResultFields)>,
    session_start_ms: i64,
    diagnostics: &mut dyn Diagnostics,
) -> ToolCallRecord {
    let tool = fields
        .tool
        .clone()
        .or_else(|| result.and_then(|(_, f)| f.tool.clone()))
        .unwrap_or_else(|| UNKNOWN_TOOL.to_string());

    let mut record = ToolCallRecord {
        id: call_id.to_string(),
        tool,
        input: fields.input.clone(),
        output: None,
        status: ToolStatus::Running,
        duration_ms: None,
        timestamp: start.timestamp,
        time_offset: format_offset(start.timestamp - session_start_ms),
        error: None,
    };

    if let Some((result_event, result_fields)) = result {
        let delta = result_event.timestamp - start.timestamp;
        if delta < 0 {
            diagnostics.report(Diagnostic::NegativeDuration {
                call_id: call_id.to_string(),
                delta_ms: delta,
            });
        }
        record.duration_ms = Some(delta.max(0) as u64);
        record.status = if result_fields.is_error {
            ToolStatus::Error
        } else {
            ToolStatus::Complete
        };
        record.output = result_fields.output.clone();
        record.error = result_fields.error.clone();
    }

    record
}
