use crate::error::{Error, Result};
use chrono::DateTime;

/// Format a millisecond offset from session start as a human-relative label.
///
/// `m:ss` under an hour, `h:mm:ss` at or above. Negative offsets (events
/// recorded before the session's nominal start) clamp to `0:00`.
pub fn format_offset(offset_ms: i64) -> String {
    let total_seconds = (offset_ms.max(0)) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Parse a session's ISO-8601 creation timestamp into epoch milliseconds.
///
/// Parse failure is a precondition failure for the whole engine: callers
/// must stop here and present an error state instead of invoking the
/// normalizer, reconciler, or clock with a garbage start time.
pub fn session_start_ms(iso: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| Error::InvalidSessionStart(iso.to_string()))
}
