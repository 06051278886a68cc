//! Agent-level streaming events.
//!
//! `AgentStreamEvent` is what [`ReactAgent::run_stream`] yields: model text
//! as it arrives, tool activity, and a final summary with cost.
//!
//! [`ReactAgent::run_stream`]: crate::react::ReactAgent::run_stream

use serde::{Deserialize, Serialize};

/// Events emitted by the agent during streaming execution.
///
/// - `thinking`: the agent started a model call
/// - `chunk`: partial text from the model
/// - `status`: free-form progress message
/// - `tool_call`: agent is invoking a tool
/// - `tool_result`: tool execution completed
/// - `done`: the run finished; carries output and totals
/// - `error`: the run failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentStreamEvent {
    Thinking { agent: String },

    Chunk { content: String },

    Status { message: String },

    ToolCall { name: String, input: String },

    ToolResult { name: String, output: String },

    Done {
        run_id: String,
        output: String,
        cost: f64,
        tokens: u64,
        iterations: u32,
    },

    Error { message: String },
}

impl AgentStreamEvent {
    /// The serialized `type` tag of this event.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Thinking { .. } => "thinking",
            Self::Chunk { .. } => "chunk",
            Self::Status { .. } => "status",
            Self::ToolCall { .. } => "tool_call",
            Self::ToolResult { .. } => "tool_result",
            Self::Done { .. } => "done",
            Self::Error { .. } => "error",
        }
    }

    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_serialization() {
        let event = AgentStreamEvent::Chunk {
            content: "Hello".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"chunk""#));
        assert!(json.contains(r#""content":"Hello""#));
    }

    #[test]
    fn done_serialization() {
        let event = AgentStreamEvent::Done {
            run_id: "abc".into(),
            output: "4".into(),
            cost: 0.5,
            tokens: 30,
            iterations: 2,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"done""#));
        assert!(json.contains(r#""iterations":2"#));
        assert!(json.contains(r#""tokens":30"#));
        assert!(event.is_terminal());
    }

    #[test]
    fn event_type_matches_tag() {
        let events = [
            AgentStreamEvent::Thinking { agent: "a".into() },
            AgentStreamEvent::Status {
                message: "m".into(),
            },
            AgentStreamEvent::ToolCall {
                name: "calculator".into(),
                input: "2+2".into(),
            },
            AgentStreamEvent::ToolResult {
                name: "calculator".into(),
                output: "4".into(),
            },
            AgentStreamEvent::Error {
                message: "boom".into(),
            },
        ];
        for event in events {
            let json: serde_json::Value = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.event_type());
        }
    }

    #[test]
    fn event_deserialization() {
        let json = r#"{"type":"tool_call","name":"calculator","input":"2+2"}"#;
        let event: AgentStreamEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            AgentStreamEvent::ToolCall {
                name: "calculator".into(),
                input: "2+2".into()
            }
        );
        assert!(!event.is_terminal());
    }
}
