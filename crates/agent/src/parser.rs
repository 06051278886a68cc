//! Model output parsing.
//!
//! Turns the raw text of one model response into either an [`Action`]
//! (call a tool) or a [`Finish`] (final answer). The grammar is strict:
//! text that names both, or neither, is rejected.

use reasonact_core::error::ParseError;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Marker that introduces the final answer.
pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";

/// A request to invoke a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub tool: String,
    pub tool_input: String,
    /// The model response this action was parsed from, verbatim.
    pub log: String,
}

/// A terminal answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finish {
    pub output: String,
    pub log: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    Action(Action),
    Finish(Finish),
}

fn action_pattern() -> &'static Regex {
    static ACTION: OnceLock<Regex> = OnceLock::new();
    ACTION.get_or_init(|| {
        Regex::new(r"(?s)Action\s*\d*\s*:\s*(.*?)\s*Action\s*\d*\s*Input\s*\d*\s*:\s*(.*)")
            .expect("action pattern is a valid regex")
    })
}

/// Parse one model response.
///
/// An action takes precedence in matching, but a response that also
/// carries a final answer is ambiguous and fails.
pub fn parse_output(text: &str) -> Result<ParseResult, ParseError> {
    let has_answer = text.contains(FINAL_ANSWER_MARKER);

    if let Some(caps) = action_pattern().captures(text) {
        if has_answer {
            return Err(ParseError::Ambiguous {
                text: text.to_string(),
            });
        }
        let tool = caps.get(1).map_or("", |m| m.as_str()).trim();
        let raw_input = caps.get(2).map_or("", |m| m.as_str()).trim();
        // SQL keeps its quotes; anything else loses surrounding ones.
        let tool_input = if raw_input.starts_with("SELECT ") {
            raw_input
        } else {
            raw_input.trim_matches('"')
        };
        return Ok(ParseResult::Action(Action {
            tool: tool.to_string(),
            tool_input: tool_input.to_string(),
            log: text.to_string(),
        }));
    }

    if has_answer {
        let output = text
            .rsplit(FINAL_ANSWER_MARKER)
            .next()
            .unwrap_or_default()
            .trim();
        return Ok(ParseResult::Finish(Finish {
            output: output.to_string(),
            log: text.to_string(),
        }));
    }

    Err(ParseError::Unparseable {
        text: text.to_string(),
    })
}
