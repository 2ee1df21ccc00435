//! Fluent builder for raw session event logs.
//!
//! Emits either tag generation so tests can exercise the schema translation
//! with the same scenario shape.

use serde_json::{Value, json};
use traceplay_types::RawEvent;

/// Which historical event-naming convention to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaGeneration {
    /// Bare tags (`tool:start`) with legacy payload fields (`id`, `tool`).
    Legacy,
    /// `agent-runtime:` prefixed tags with renamed payload fields
    /// (`toolCallId`, `toolName`).
    AgentRuntime,
}

#[derive(Debug)]
pub struct EventLogBuilder {
    generation: SchemaGeneration,
    events: Vec<RawEvent>,
    next_id: usize,
}

impl EventLogBuilder {
    pub fn new() -> Self {
        Self::with_generation(SchemaGeneration::Legacy)
    }

    pub fn agent_runtime() -> Self {
        Self::with_generation(SchemaGeneration::AgentRuntime)
    }

    pub fn with_generation(generation: SchemaGeneration) -> Self {
        Self {
            generation,
            events: Vec::new(),
            next_id: 0,
        }
    }

    pub fn system(self, ts: i64, content: &str) -> Self {
        let data = json!({ "content": content });
        self.push("system", "agent-runtime:system", ts, data)
    }

    pub fn user(self, ts: i64, content: &str) -> Self {
        let data = json!({ "content": content });
        self.push("user", "agent-runtime:user", ts, data)
    }

    pub fn assistant(self, ts: i64, content: &str) -> Self {
        let data = json!({ "content": content });
        self.push("assistant", "agent-runtime:assistant", ts, data)
    }

    pub fn assistant_with_usage(
        self,
        ts: i64,
        content: &str,
        model: &str,
        input_tokens: u64,
        output_tokens: u64,
    ) -> Self {
        let data = json!({
            "content": content,
            "model": model,
            "usage": {
                "inputTokens": input_tokens,
                "outputTokens": output_tokens,
                "totalTokens": input_tokens + output_tokens,
            },
        });
        self.push("assistant", "agent-runtime:assistant", ts, data)
    }

    pub fn status(self, ts: i64, status: &str) -> Self {
        let data = json!({ "status": status });
        self.push("status", "agent-runtime:status", ts, data)
    }

    pub fn token_delta(self, ts: i64) -> Self {
        self.push("token:delta", "agent-runtime:token-delta", ts, json!({}))
    }

    pub fn tool_start(self, ts: i64, call_id: &str, tool: &str, input: Value) -> Self {
        let data = match self.generation {
            SchemaGeneration::Legacy => json!({ "id": call_id, "tool": tool, "input": input }),
            SchemaGeneration::AgentRuntime => {
                json!({ "toolCallId": call_id, "toolName": tool, "input": input })
            }
        };
        self.push("tool:start", "agent-runtime:tool-start", ts, data)
    }

    pub fn tool_result(self, ts: i64, call_id: &str, output: Value) -> Self {
        let data = match self.generation {
            SchemaGeneration::Legacy => json!({ "id": call_id, "output": output }),
            SchemaGeneration::AgentRuntime => {
                json!({ "toolCallId": call_id, "output": output })
            }
        };
        self.push("tool:result", "agent-runtime:tool-result", ts, data)
    }

    pub fn tool_error(self, ts: i64, call_id: &str, message: &str) -> Self {
        let data = match self.generation {
            SchemaGeneration::Legacy => json!({ "id": call_id, "error": message }),
            SchemaGeneration::AgentRuntime => {
                json!({ "toolCallId": call_id, "error": message })
            }
        };
        self.push("tool:result", "agent-runtime:tool-result", ts, data)
    }

    /// Append an arbitrary raw event, for malformed or unknown-type cases.
    pub fn raw(mut self, event_type: &str, ts: i64, data: Value) -> Self {
        let id = self.allocate_id();
        self.events.push(RawEvent::new(id, event_type, ts, data));
        self
    }

    pub fn build(self) -> Vec<RawEvent> {
        self.events
    }

    fn push(mut self, legacy_tag: &str, runtime_tag: &str, ts: i64, data: Value) -> Self {
        let tag = match self.generation {
            SchemaGeneration::Legacy => legacy_tag,
            SchemaGeneration::AgentRuntime => runtime_tag,
        };
        let id = self.allocate_id();
        self.events.push(RawEvent::new(id, tag, ts, data));
        self
    }

    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        format!("evt-{}", self.next_id)
    }
}

impl Default for EventLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
