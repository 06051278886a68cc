//! Prompt templates and composition.
//!
//! A template is plain text with four placeholders:
//!
//! | Placeholder          | Filled with                                   |
//! |----------------------|-----------------------------------------------|
//! | `{instruction}`      | the task given to the agent                   |
//! | `{agent_scratchpad}` | prior steps, see [`build_scratchpad`]         |
//! | `{tool_description}` | one `name[input]: description` line per tool  |
//! | `{tool_names}`       | tool names joined with `", "`                 |
//!
//! `{{` and `}}` produce literal braces. Templates are validated when
//! parsed, so rendering cannot fail.

use crate::scratchpad::{TraceEntry, build_scratchpad};
use reasonact_core::error::{Error, Result};
use reasonact_core::tool::ToolRegistry;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// The zero-shot ReAct prompt used when no template is configured.
pub const ZERO_SHOT_REACT: &str = "Answer the following questions as best you can. You have access to the following tools:
{tool_description}
Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Begin!

Question: {instruction}
Thought:{agent_scratchpad}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Instruction,
    Scratchpad,
    ToolDescription,
    ToolNames,
}

impl Slot {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "instruction" => Some(Self::Instruction),
            "agent_scratchpad" => Some(Self::Scratchpad),
            "tool_description" => Some(Self::ToolDescription),
            "tool_names" => Some(Self::ToolNames),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// A validated prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy)]
pub struct PromptVars<'a> {
    pub instruction: &'a str,
    pub agent_scratchpad: &'a str,
    pub tool_description: &'a str,
    pub tool_names: &'a str,
}

impl PromptTemplate {
    /// Parse and validate a template.
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => {
                                return Err(config_error("unbalanced '{' in prompt template"));
                            }
                            Some(ch) => name.push(ch),
                        }
                    }
                    let slot = Slot::from_name(&name).ok_or_else(|| {
                        config_error(format!("unknown placeholder {{{name}}} in prompt template"))
                    })?;
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Slot(slot));
                }
                '}' => return Err(config_error("unbalanced '}' in prompt template")),
                _ => text.push(c),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        let template = Self { segments };
        for (slot, name) in [
            (Slot::Instruction, "{instruction}"),
            (Slot::Scratchpad, "{agent_scratchpad}"),
        ] {
            if !template.has(slot) {
                return Err(config_error(format!(
                    "prompt template is missing the required {name} placeholder"
                )));
            }
        }
        Ok(template)
    }

    /// Read and parse a template file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "failed to read prompt template {}: {e}",
                path.display()
            ))
        })?;
        Self::parse(&text)
    }

    /// The built-in zero-shot ReAct template, parsed once per process.
    pub fn zero_shot_react() -> Result<&'static Self> {
        static DEFAULT: OnceLock<std::result::Result<PromptTemplate, String>> = OnceLock::new();
        DEFAULT
            .get_or_init(|| Self::parse(ZERO_SHOT_REACT).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|message| Error::Config {
                message: message.clone(),
            })
    }

    fn has(&self, slot: Slot) -> bool {
        self.segments.contains(&Segment::Slot(slot))
    }

    /// Substitute `vars` in a single pass; substituted text is never
    /// re-scanned for placeholders.
    pub fn render(&self, vars: &PromptVars<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(match segment {
                Segment::Text(text) => text,
                Segment::Slot(Slot::Instruction) => vars.instruction,
                Segment::Slot(Slot::Scratchpad) => vars.agent_scratchpad,
                Segment::Slot(Slot::ToolDescription) => vars.tool_description,
                Segment::Slot(Slot::ToolNames) => vars.tool_names,
            });
        }
        out
    }
}

fn config_error(message: impl Into<String>) -> Error {
    Error::Config {
        message: message.into(),
    }
}

/// Render the tool catalogue, one newline-terminated line per tool.
pub fn tool_description(tools: &ToolRegistry) -> String {
    tools
        .iter()
        .map(|t| format!("{}[input]: {}\n", t.name(), t.description()))
        .collect()
}

/// Builds the full prompt for each iteration.
#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    template: Option<Arc<PromptTemplate>>,
}

impl PromptComposer {
    /// Use `template`; `None` selects the zero-shot ReAct default.
    pub fn new(template: Option<Arc<PromptTemplate>>) -> Self {
        Self { template }
    }

    fn template(&self) -> Result<&PromptTemplate> {
        match &self.template {
            Some(template) => Ok(template.as_ref()),
            None => PromptTemplate::zero_shot_react(),
        }
    }

    pub fn compose(
        &self,
        instruction: &str,
        tools: &ToolRegistry,
        trace: &[TraceEntry],
    ) -> Result<String> {
        let template = self.template()?;
        let scratchpad = build_scratchpad(trace);
        let description = tool_description(tools);
        let names = tools.names().join(", ");

        let prompt = template.render(&PromptVars {
            instruction,
            agent_scratchpad: &scratchpad,
            tool_description: &description,
            tool_names: &names,
        });
        debug!(steps = trace.len(), chars = prompt.len(), "Composed prompt");
        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Action;
    use async_trait::async_trait;
    use reasonact_core::error::ToolError;
    use reasonact_core::tool::{Tool, ToolOutput};

    struct Named(&'static str, &'static str);

    #[async_trait]
    impl Tool for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            self.1
        }
        async fn invoke(&self, _input: &str) -> std::result::Result<ToolOutput, ToolError> {
            Ok(ToolOutput::Text(String::new()))
        }
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::new()
            .with(Box::new(Named("search", "Look things up")))
            .unwrap()
            .with(Box::new(Named("calculator", "Do math")))
            .unwrap()
    }

    fn vars<'a>(instruction: &'a str, pad: &'a str) -> PromptVars<'a> {
        PromptVars {
            instruction,
            agent_scratchpad: pad,
            tool_description: "",
            tool_names: "",
        }
    }

    #[test]
    fn catalogue_lines_in_declaration_order() {
        assert_eq!(
            tool_description(&registry()),
            "search[input]: Look things up\ncalculator[input]: Do math\n"
        );
    }

    #[test]
    fn escaped_braces_render_literally() {
        let t = PromptTemplate::parse("{{json}} {instruction}{agent_scratchpad}").unwrap();
        assert_eq!(t.render(&vars("go", "")), "{json} go");
    }

    #[test]
    fn substitution_is_single_pass() {
        let t = PromptTemplate::parse("Q: {instruction}\n{agent_scratchpad}").unwrap();
        let out = t.render(&vars("{agent_scratchpad}", "pad"));
        assert_eq!(out, "Q: {agent_scratchpad}\npad");
    }

    #[test]
    fn unknown_placeholder_rejected() {
        let err = PromptTemplate::parse("{instruction}{agent_scratchpad}{history}").unwrap_err();
        assert!(matches!(err, Error::Config { ref message } if message.contains("history")));
    }

    #[test]
    fn unbalanced_braces_rejected() {
        assert!(PromptTemplate::parse("{instruction}{agent_scratchpad} {oops").is_err());
        assert!(PromptTemplate::parse("{instruction}{agent_scratchpad} }").is_err());
    }

    #[test]
    fn required_placeholders_enforced() {
        let err = PromptTemplate::parse("{instruction} only").unwrap_err();
        assert!(err.to_string().contains("{agent_scratchpad}"));
        assert!(PromptTemplate::parse("{agent_scratchpad} only").is_err());
    }

    #[test]
    fn default_template_binds_once() {
        let first = PromptTemplate::zero_shot_react().unwrap();
        let second = PromptTemplate::zero_shot_react().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn compose_with_default_template() {
        let composer = PromptComposer::default();
        let prompt = composer.compose("What is 2+2?", &registry(), &[]).unwrap();

        assert!(prompt.contains("search[input]: Look things up\ncalculator[input]: Do math\n"));
        assert!(prompt.contains("should be one of [search, calculator]"));
        assert!(prompt.ends_with("Question: What is 2+2?\nThought:"));
    }

    #[test]
    fn compose_appends_scratchpad() {
        let trace = vec![TraceEntry::new(
            Action {
                tool: "calculator".into(),
                tool_input: "2+2".into(),
                log: " add\nAction: calculator\nAction Input: 2+2".into(),
            },
            "4",
        )];
        let composer = PromptComposer::default();
        let prompt = composer.compose("What is 2+2?", &registry(), &trace).unwrap();
        assert!(prompt.ends_with(
            "Thought: add\nAction: calculator\nAction Input: 2+2\nObservation: 4\nThought:"
        ));
    }

    #[test]
    fn custom_template_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Tools: {{tool_names}}\nTask: {{instruction}}\n{{agent_scratchpad}}").unwrap();

        let template = PromptTemplate::from_file(file.path()).unwrap();
        let composer = PromptComposer::new(Some(Arc::new(template)));
        let prompt = composer.compose("sum", &registry(), &[]).unwrap();
        assert_eq!(prompt, "Tools: search, calculator\nTask: sum\n");
    }

    #[test]
    fn missing_template_file_is_config_error() {
        let err = PromptTemplate::from_file(Path::new("/nonexistent/react.txt")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
