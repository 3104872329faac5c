//! Tool system for agent capabilities.

use crate::error::{AgentError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod builtin;
pub mod registry;

pub use registry::ToolRegistry;

/// Immutable tool descriptor registered with the agent at construction time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name the model refers to in Action directives
    pub name: String,
    /// Human-readable description rendered into the system prompt
    pub description: String,
    /// JSON schema describing the invocation contract
    pub input_schema: serde_json::Value,
}

/// Tool execution result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the tool execution was successful
    pub success: bool,
    /// Tool output content
    pub content: String,
    /// Additional metadata
    pub metadata: HashMap<String, serde_json::Value>,
    /// Error message if execution failed
    pub error: Option<String>,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            metadata: HashMap::new(),
            error: None,
        }
    }

    /// Create a failed tool result
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: String::new(),
            metadata: HashMap::new(),
            error: Some(error.into()),
        }
    }

    /// Add metadata to the result
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Check if the result contains an error
    #[must_use]
    pub fn is_error(&self) -> bool {
        !self.success || self.error.is_some()
    }

    /// Get the error message if any
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Core tool trait that all tools must implement.
///
/// The invocation contract is deliberately narrow: tools receive the raw
/// Action Input string exactly as parsed from model output and return an
/// observation payload.
#[async_trait]
pub trait Tool: Send + Sync + std::fmt::Debug {
    /// Get the tool's schema definition
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given action input
    async fn invoke(&self, input: &str) -> Result<ToolResult>;

    /// Get the tool name
    fn name(&self) -> String {
        self.schema().name
    }

    /// Get the tool description
    fn description(&self) -> String {
        self.schema().description
    }

    /// Validate the action input before execution
    fn validate_input(&self, input: &str) -> Result<()> {
        if input.trim().is_empty() {
            return Err(AgentError::validation(
                "input",
                "Tool input must not be empty",
            ));
        }
        Ok(())
    }
}

/// Helper function to create a simple JSON schema for tool parameters
#[must_use]
pub fn create_simple_schema(
    properties: HashMap<String, serde_json::Value>,
    required: Vec<String>,
) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Helper function to create a string parameter schema
#[must_use]
pub fn string_param(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

/// Helper function to create a number parameter schema
#[must_use]
pub fn number_param(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "number",
        "description": description
    })
}
