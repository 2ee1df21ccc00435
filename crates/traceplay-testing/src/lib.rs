//! Testing infrastructure for traceplay integration tests.
//!
//! Provides utilities for writing robust tests against the replay engine:
//! - `EventLogBuilder`: fluent construction of raw event logs in either
//!   schema generation
//! - `fixtures`: parsing of inline JSONL session logs

pub mod events;
pub mod fixtures;

pub use events::{EventLogBuilder, SchemaGeneration};
pub use fixtures::parse_jsonl_log;
