pub mod entry;
pub mod error;
pub mod event;
pub mod time;
pub mod tool;

pub use entry::{DisplayEntry, EntryKind, TokenUsage, ToolCallView};
pub use error::{Error, Result};
pub use event::RawEvent;
pub use time::{format_offset, session_start_ms};
pub use tool::{ToolCallRecord, ToolCallStats, ToolStatus, ToolUsage};
