//! Tool trait — the abstraction over agent capabilities.
//!
//! Tools are what give the agent the ability to act in the world: do math,
//! search, or delegate to another agent. Every tool takes a single string
//! input, exactly as the model wrote it after `Action Input:`.

use crate::error::ToolError;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// The result of a tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// A plain observation.
    Text(String),

    /// An observation produced by a nested agent, carrying the usage that
    /// agent incurred on its own model calls.
    WithUsage {
        output: String,
        cost: f64,
        tokens: u64,
    },
}

impl ToolOutput {
    /// The observation text fed back into the scratchpad.
    pub fn observation(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::WithUsage { output, .. } => output,
        }
    }

    /// Usage reported by a nested agent, if any.
    pub fn usage(&self) -> Option<(f64, u64)> {
        match self {
            Self::Text(_) => None,
            Self::WithUsage { cost, tokens, .. } => Some((*cost, *tokens)),
        }
    }
}

impl From<String> for ToolOutput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ToolOutput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// The core Tool trait.
///
/// Each capability (calculator, nested agent, ...) implements this trait.
/// Tools are registered in the [`ToolRegistry`] and made available to the
/// reasoning loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "calculator").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// Invoke the tool with the raw action input.
    async fn invoke(&self, input: &str) -> std::result::Result<ToolOutput, ToolError>;
}

/// An ordered registry of available tools.
///
/// The reasoning loop uses this to:
/// 1. Render the tool catalogue in declaration order
/// 2. Look up and invoke tools when the LLM names one
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. Fails if a tool with the same name already exists.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> std::result::Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::Duplicate(name));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, tool: Box<dyn Tool>) -> std::result::Result<Self, ToolError> {
        self.register(tool)?;
        Ok(self)
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// Iterate over tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    /// Resolve `name` and invoke it with `input`.
    ///
    /// A name that is not registered is an error, never a silent no-op.
    pub async fn dispatch(
        &self,
        name: &str,
        input: &str,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        debug!(tool = name, "Dispatching tool");
        tool.invoke(input).await
    }

    /// List all registered tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
