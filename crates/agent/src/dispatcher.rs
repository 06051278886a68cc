//! Routes parsed actions to registered tools.

use crate::parser::Action;
use reasonact_core::error::Result;
use reasonact_core::tool::{ToolOutput, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, info};

/// Name-to-tool lookup shared by every run of an agent.
#[derive(Clone)]
pub struct ToolDispatcher {
    tools: Arc<ToolRegistry>,
}

impl ToolDispatcher {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self { tools }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Invoke the tool named by `action`.
    ///
    /// Unknown names and tool failures both abort the run.
    pub async fn dispatch(&self, action: &Action) -> Result<ToolOutput> {
        info!(tool = %action.tool, input = %action.tool_input, "Action");
        let output = self
            .tools
            .dispatch(&action.tool, &action.tool_input)
            .await?;
        debug!(tool = %action.tool, observation = %output.observation(), "Observation");
        Ok(output)
    }
}
