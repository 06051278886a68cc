//! The ReAct reasoning loop at the heart of ReasonAct.
//!
//! The agent follows a **Thought → Action → Observation** cycle:
//!
//! 1. **Compose** a prompt from the instruction, tool catalogue and the
//!    steps taken so far (the scratchpad)
//! 2. **Invoke** the model, stopping at `Observation:`
//! 3. **Parse** the reply into an action or a final answer
//! 4. **If action**: dispatch the tool, record the observation, loop
//! 5. **If final answer**: return it with the run's cost and token totals
//!
//! The loop also stops when the iteration budget is spent, returning the
//! model's last reply.

pub mod agent_tool;
pub mod dispatcher;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod react;
pub mod scratchpad;
pub mod stream_event;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use agent_tool::AgentTool;
pub use dispatcher::ToolDispatcher;
pub use output::{ChannelSink, NullSink, OutputSink};
pub use parser::{Action, Finish, ParseResult, parse_output};
pub use prompt::{PromptComposer, PromptTemplate};
pub use react::{AgentOutput, ReactAgent, pricing_from_config};
pub use scratchpad::{TraceEntry, build_scratchpad};
pub use stream_event::AgentStreamEvent;
