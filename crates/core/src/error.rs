//! Error types for the ReasonAct domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all ReasonAct operations.
///
/// Every variant is fatal for the run that produced it: the reasoning loop
/// never recovers from an error mid-run.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Model output parsing ---
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Cost accounting ---
    #[error("Pricing error: {0}")]
    Pricing(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures turning raw model text into an action or a final answer.
///
/// Both variants carry the offending text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Parsing LLM output produced both a final answer and a parse-able action: `{text}`")]
    Ambiguous { text: String },

    #[error("Could not parse LLM output: `{text}`")]
    Unparseable { text: String },
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool already registered: {0}")]
    Duplicate(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = Error::Tool(ToolError::ExecutionFailed {
            tool_name: "calculator".into(),
            reason: "division by zero".into(),
        });
        assert!(err.to_string().contains("calculator"));
        assert!(err.to_string().contains("division by zero"));
    }

    #[test]
    fn parse_error_carries_offending_text() {
        let err: Error = ParseError::Unparseable {
            text: "I am thinking...".into(),
        }
        .into();
        assert!(matches!(err, Error::Parse(ParseError::Unparseable { .. })));
        assert!(err.to_string().contains("I am thinking..."));
    }
}
