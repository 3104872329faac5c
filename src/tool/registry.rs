//! Tool registry for managing and discovering tools.

use crate::{
    error::{AgentError, Result},
    tool::{Tool, ToolSchema},
};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, info};

/// Registry of the tools an agent may dispatch to.
///
/// The system registers exactly one search tool today, but the registry
/// keeps the general shape so lookup failures stay a first-class, testable
/// path rather than a hardcoded branch.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool in the registry
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name();

        if self.tools.contains_key(&name) {
            return Err(AgentError::configuration(format!(
                "Tool '{name}' is already registered"
            )));
        }

        info!("Registering tool: {}", name);
        self.tools.insert(name, tool);

        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tool = self.tools.get(name).map(Arc::clone);
        if tool.is_none() {
            debug!("Tool '{}' not found in registry", name);
        }
        tool
    }

    /// Check if a tool exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get all registered tool names, sorted for stable prompt rendering
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all tool schemas
    #[must_use]
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|tool| tool.schema()).collect()
    }

    /// Render "name: description" lines for the system prompt
    #[must_use]
    pub fn descriptions(&self) -> String {
        let mut lines: Vec<String> = self
            .tools
            .values()
            .map(|tool| format!("- {}: {}", tool.name(), tool.description()))
            .collect();
        lines.sort();
        lines.join("\n")
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{ToolResult, create_simple_schema, string_param};
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            let mut properties = HashMap::new();
            properties.insert("input".to_string(), string_param("Text to echo"));

            ToolSchema {
                name: "echo".to_string(),
                description: "Echo the input back".to_string(),
                input_schema: create_simple_schema(properties, vec!["input".to_string()]),
            }
        }

        async fn invoke(&self, input: &str) -> Result<ToolResult> {
            Ok(ToolResult::success(input))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        assert!(registry.contains("echo"));
        assert!(!registry.contains("calculator"));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("echo").is_some());
        assert!(registry.get("calculator").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let err = registry.register(Arc::new(EchoTool)).unwrap_err();
        assert!(matches!(err, AgentError::Configuration { .. }));
    }

    #[test]
    fn test_descriptions_for_prompt() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let descriptions = registry.descriptions();
        assert_eq!(descriptions, "- echo: Echo the input back");
        assert_eq!(registry.tool_names(), vec!["echo".to_string()]);
    }
}
