//! Error types for the webquest agent.

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Error types covering every failure surface of the agent loop
#[derive(Error, Debug)]
pub enum AgentError {
    /// Tool invocation failed (network, quota, malformed query)
    #[error("Tool error: {tool_name} - {message}")]
    Tool {
        /// Tool name
        tool_name: String,
        /// Error message
        message: String,
    },

    /// Model output did not match the Action / Final Answer grammar
    #[error("Parse error: {message}")]
    Parse {
        /// Error message
        message: String,
    },

    /// Iteration cap exhausted without a final answer
    #[error("Reasoning incomplete after {iterations} iterations")]
    IncompleteReasoning {
        /// Number of iterations the loop ran before giving up
        iterations: usize,
    },

    /// Language model service unreachable or errored
    #[error("LLM error: {message}")]
    Llm {
        /// Error message
        message: String,
    },

    /// Agent or tool construction errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Input validation errors
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport errors from the search backend
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AgentError {
    /// Create a tool error
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an incomplete-reasoning error
    pub fn incomplete_reasoning(iterations: usize) -> Self {
        Self::IncompleteReasoning { iterations }
    }

    /// Create an LLM service error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check whether retrying the whole run can plausibly help.
    ///
    /// Service and transport failures are transient; an exhausted iteration
    /// cap depends on model output and may resolve on a fresh run.
    /// Configuration, validation, and grammar errors are permanent.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Llm { .. } | Self::Http(_) | Self::IncompleteReasoning { .. }
        )
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::Tool { .. } => "tool",
            Self::Parse { .. } => "parse",
            Self::IncompleteReasoning { .. } => "incomplete_reasoning",
            Self::Llm { .. } => "llm",
            Self::Configuration { .. } => "configuration",
            Self::Validation { .. } => "validation",
            Self::Serialization(_) => "serialization",
            Self::Http(_) => "http",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = AgentError::tool("web_search", "quota exceeded");
        assert!(matches!(err, AgentError::Tool { .. }));
        assert_eq!(err.category(), "tool");
    }

    #[test]
    fn test_error_retryable() {
        assert!(AgentError::llm("connection refused").is_retryable());
        assert!(AgentError::incomplete_reasoning(10).is_retryable());

        assert!(!AgentError::configuration("bad config").is_retryable());
        assert!(!AgentError::validation("query", "must not be empty").is_retryable());
        assert!(!AgentError::parse("no marker found").is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = AgentError::tool("web_search", "request timed out");
        let display = format!("{err}");
        assert!(display.contains("web_search"));
        assert!(display.contains("request timed out"));

        let err = AgentError::incomplete_reasoning(10);
        assert!(format!("{err}").contains("10 iterations"));
    }
}
