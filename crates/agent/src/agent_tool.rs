//! Exposes a [`ReactAgent`] as a tool of another agent.

use crate::react::ReactAgent;
use async_trait::async_trait;
use reasonact_core::error::ToolError;
use reasonact_core::tool::{Tool, ToolOutput};
use tracing::debug;

/// A nested agent, invoked with the action input as its instruction.
///
/// The observation is the nested run's output; its cost and tokens are
/// reported so the calling run can add them to its own totals.
pub struct AgentTool {
    agent: ReactAgent,
}

impl AgentTool {
    pub fn new(agent: ReactAgent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        self.agent.name()
    }

    fn description(&self) -> &str {
        self.agent.description()
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let out = self
            .agent
            .run(input)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.agent.name().to_string(),
                reason: e.to_string(),
            })?;
        debug!(
            agent = %self.agent.name(),
            run_id = %out.run_id,
            cost = out.cost,
            tokens = out.tokens,
            "Nested agent finished"
        );
        Ok(ToolOutput::WithUsage {
            output: out.output,
            cost: out.cost,
            tokens: out.tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use reasonact_core::tool::ToolRegistry;
    use std::sync::Arc;

    fn nested(replies: &[&str]) -> AgentTool {
        let provider = Arc::new(ScriptedProvider::texts(replies));
        AgentTool::new(
            ReactAgent::new(provider, MOCK_MODEL, Arc::new(ToolRegistry::new()))
                .with_pricing(mock_pricing())
                .with_name("summarizer")
                .with_description("Summarizes text"),
        )
    }

    #[test]
    fn advertises_agent_identity() {
        let tool = nested(&[]);
        assert_eq!(tool.name(), "summarizer");
        assert_eq!(tool.description(), "Summarizes text");
    }

    #[tokio::test]
    async fn reports_nested_usage() {
        let tool = nested(&["Final Answer: short"]);
        let out = tool.invoke("a long text").await.unwrap();
        assert_eq!(out.observation(), "short");
        let (cost, tokens) = out.usage().unwrap();
        assert!((cost - MOCK_CALL_COST).abs() < 1e-12);
        assert_eq!(tokens, 15);
    }

    #[tokio::test]
    async fn nested_failure_becomes_tool_error() {
        let tool = nested(&["no idea"]);
        let err = tool.invoke("a long text").await.unwrap_err();
        assert!(matches!(
            err,
            ToolError::ExecutionFailed { ref tool_name, .. } if tool_name == "summarizer"
        ));
    }
}
