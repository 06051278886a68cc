//! The reasoning trace of one run and its rendering into the prompt.

use crate::parser::Action;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed step: the action the model chose and what it observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub action: Action,
    pub observation: String,
    pub timestamp: DateTime<Utc>,
}

impl TraceEntry {
    pub fn new(action: Action, observation: impl Into<String>) -> Self {
        Self {
            action,
            observation: observation.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Render prior steps so the model can continue its chain of thought.
///
/// Each step contributes the model's raw response followed by its
/// observation and a fresh `Thought:` cue.
pub fn build_scratchpad(trace: &[TraceEntry]) -> String {
    trace.iter().fold(String::new(), |mut pad, entry| {
        pad.push_str(&entry.action.log);
        pad.push_str("\nObservation: ");
        pad.push_str(&entry.observation);
        pad.push_str("\nThought:");
        pad
    })
}
