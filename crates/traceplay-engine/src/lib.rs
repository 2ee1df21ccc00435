// Engine module - core processing logic (normalization, reconciliation, playback)
// This layer sits between raw session logs (types) and the presentation layer

pub mod diagnostics;
pub mod normalizer;
pub mod playback;
pub mod reconcile;
mod schema;
pub mod stats;

pub use diagnostics::{CollectSink, Diagnostic, Diagnostics, NullSink, TracingSink};
pub use normalizer::normalize_with;
pub use playback::{PlaybackClock, PlaybackSpeed, ReplayState};
pub use reconcile::reconcile_with;

use traceplay_types::{DisplayEntry, RawEvent, ToolCallRecord, ToolCallStats};

// Façade API - stable public interface for presentation layers
// Consumers should use these functions instead of reaching into internal modules

/// Normalize a raw event log into an ordered display timeline.
pub fn normalize(events: &[RawEvent], session_start_ms: i64) -> Vec<DisplayEntry> {
    normalizer::normalize(events, session_start_ms)
}

/// Extract one record per tool invocation from a raw event log.
pub fn reconcile(events: &[RawEvent], session_start_ms: i64) -> Vec<ToolCallRecord> {
    reconcile::reconcile(events, session_start_ms)
}

/// Reduce tool-call records into summary counters.
pub fn aggregate(records: &[ToolCallRecord]) -> ToolCallStats {
    stats::aggregate(records)
}
