use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw event as recorded in a session log.
///
/// The log is append-only and loosely structured: `event_type` is an open
/// string tag and `data` is an untyped, schema-version-dependent payload.
/// Events are immutable and externally supplied; source order is the log
/// order, which is not guaranteed to be timestamp-sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    /// Unique event ID (opaque provider string).
    pub id: String,

    /// Open event type tag, e.g. `tool:start` or `agent-runtime:tool-start`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,

    /// Untyped payload. Shape depends on event type and schema generation.
    #[serde(default)]
    pub data: Value,
}

impl RawEvent {
    pub fn new(
        id: impl Into<String>,
        event_type: impl Into<String>,
        timestamp: i64,
        data: Value,
    ) -> Self {
        Self {
            id: id.into(),
            event_type: event_type.into(),
            timestamp,
            data,
        }
    }
}
