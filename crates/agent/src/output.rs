//! Sinks for streaming-mode progress.
//!
//! The reasoning loop reports progress to an [`OutputSink`]; notifications
//! never influence what the loop does next.

use crate::stream_event::AgentStreamEvent;
use tokio::sync::mpsc;

/// Receives progress notifications from a streaming run.
pub trait OutputSink: Send {
    /// A model call is starting for `agent`.
    fn thinking(&mut self, agent: &str);

    /// A text fragment arrived from the model.
    fn fragment(&mut self, agent: &str, text: &str);

    /// A free-form status line.
    fn status(&mut self, message: &str);

    /// A tool is about to be invoked.
    fn tool_call(&mut self, tool: &str, _input: &str) {
        self.status(&format!("Calling function: {tool} ..."));
    }

    /// A tool returned `output`.
    fn tool_result(&mut self, tool: &str, output: &str);

    /// The run terminated without error.
    fn done(&mut self);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn thinking(&mut self, _agent: &str) {}
    fn fragment(&mut self, _agent: &str, _text: &str) {}
    fn status(&mut self, _message: &str) {}
    fn tool_result(&mut self, _tool: &str, _output: &str) {}
    fn done(&mut self) {}
}

/// Forwards notifications as [`AgentStreamEvent`]s.
///
/// Sends never block; a dropped receiver silently discards events.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<AgentStreamEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<AgentStreamEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: AgentStreamEvent) {
        let _ = self.tx.send(event);
    }
}

impl OutputSink for ChannelSink {
    fn thinking(&mut self, agent: &str) {
        self.send(AgentStreamEvent::Thinking {
            agent: agent.to_string(),
        });
    }

    fn fragment(&mut self, _agent: &str, text: &str) {
        self.send(AgentStreamEvent::Chunk {
            content: text.to_string(),
        });
    }

    fn status(&mut self, message: &str) {
        self.send(AgentStreamEvent::Status {
            message: message.to_string(),
        });
    }

    fn tool_call(&mut self, tool: &str, input: &str) {
        self.send(AgentStreamEvent::ToolCall {
            name: tool.to_string(),
            input: input.to_string(),
        });
    }

    fn tool_result(&mut self, tool: &str, output: &str) {
        self.send(AgentStreamEvent::ToolResult {
            name: tool.to_string(),
            output: output.to_string(),
        });
    }

    // The summary `done` event needs the run totals, so `run_stream`
    // emits it after the run returns.
    fn done(&mut self) {}
}
