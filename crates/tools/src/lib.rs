//! Built-in tool implementations for ReasonAct.
//!
//! Tools give the agent the ability to act between reasoning steps.
//! Nested agents are exposed as tools by `reasonact-agent`.

pub mod calculator;

use reasonact_core::tool::ToolRegistry;

pub use calculator::CalculatorTool;

/// Create a default tool registry with all built-in tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    // A fresh registry cannot hold a duplicate.
    let _ = registry.register(Box::new(CalculatorTool));
    registry
}
