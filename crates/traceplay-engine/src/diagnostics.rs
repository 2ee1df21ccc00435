use std::fmt;

/// Non-fatal problem observed while processing an event log.
///
/// The normalizer and reconciler are total functions: malformed data never
/// fails a pass, it only produces one of these on the side channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Event payload failed validation and was dropped.
    MalformedPayload { event_id: String, reason: String },
    /// Tool result with no matching start; no record is produced for it.
    OrphanResult { call_id: String },
    /// Result timestamp precedes its start; duration was clamped to 0.
    NegativeDuration { call_id: String, delta_ms: i64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedPayload { event_id, reason } => {
                write!(f, "dropped malformed event {}: {}", event_id, reason)
            }
            Diagnostic::OrphanResult { call_id } => {
                write!(f, "tool result {} has no matching start", call_id)
            }
            Diagnostic::NegativeDuration { call_id, delta_ms } => {
                write!(
                    f,
                    "tool call {} result precedes start by {}ms, clamped to 0",
                    call_id, -delta_ms
                )
            }
        }
    }
}

/// Observer for engine diagnostics.
///
/// Injectable so callers can capture or suppress diagnostics; the
/// convenience entry points default to [`TracingSink`].
pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `tracing` facade at WARN level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl Diagnostics for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(target: "traceplay::engine", "{}", diagnostic);
    }
}

/// Discards all diagnostics.
#[derive(Debug, Default)]
pub struct NullSink;

impl Diagnostics for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

/// Collects diagnostics in memory for later inspection.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl Diagnostics for CollectSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
