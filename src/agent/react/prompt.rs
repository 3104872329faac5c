//! Prompt assembly for ReAct conversations.

use crate::{tool::ToolRegistry, types::ChatMessage};

/// Default system header template.
///
/// `{tool_descriptions}` and `{tool_names}` are filled in from the registry
/// when the header is rendered.
const DEFAULT_SYSTEM_HEADER: &str = r"You are a helpful AI assistant that answers questions using live web search. You have access to the following tools:

{tool_descriptions}

Use the following format for your responses:

Question: the input question you must answer
Thought: you should always think about what to do next
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Important guidelines:
- Always start with a Thought before taking an Action
- Action Input is the plain query text, on a single line
- If you don't need tools, go directly to Final Answer
- Cite source URLs from your observations in the final answer
- If a search fails, try a different query

Begin!";

/// Corrective note appended when model output matches neither marker
const CORRECTION_NOTE: &str = "Your previous reply did not follow the expected format. Reply with either:\n\nAction: <tool name>\nAction Input: <input>\n\nor:\n\nFinal Answer: <your answer>";

/// Renders the fixed system instruction and wraps loop-generated turns
#[derive(Debug, Clone)]
pub struct PromptFormatter {
    system_header: String,
}

impl PromptFormatter {
    /// Create a formatter with the default system header
    #[must_use]
    pub fn new() -> Self {
        Self {
            system_header: DEFAULT_SYSTEM_HEADER.to_string(),
        }
    }

    /// Create a formatter with a custom system header template
    pub fn with_system_header(system_header: impl Into<String>) -> Self {
        Self {
            system_header: system_header.into(),
        }
    }

    /// Get the system header template
    #[must_use]
    pub fn system_header(&self) -> &str {
        &self.system_header
    }

    /// Render the system instruction for the given tool registry
    #[must_use]
    pub fn system_message(&self, tools: &ToolRegistry) -> ChatMessage {
        let rendered = self
            .system_header
            .replace("{tool_descriptions}", &tools.descriptions())
            .replace("{tool_names}", &tools.tool_names().join(", "));

        ChatMessage::system(rendered)
    }

    /// Wrap a tool observation as the next conversation turn.
    ///
    /// Observations are fed back in the user role so the model treats them
    /// as external input rather than its own words.
    #[must_use]
    pub fn observation_message(observation: &str) -> ChatMessage {
        ChatMessage::user(format!("Observation: {observation}"))
    }

    /// Build the corrective turn for malformed model output
    #[must_use]
    pub fn correction_message() -> ChatMessage {
        ChatMessage::user(CORRECTION_NOTE)
    }
}

impl Default for PromptFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::tool::{Tool, ToolResult, ToolSchema, create_simple_schema, string_param};
    use crate::types::MessageRole;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Debug)]
    struct NamedTool;

    #[async_trait]
    impl Tool for NamedTool {
        fn schema(&self) -> ToolSchema {
            let mut properties = HashMap::new();
            properties.insert("query".to_string(), string_param("The search query"));

            ToolSchema {
                name: "web_search".to_string(),
                description: "Search the web".to_string(),
                input_schema: create_simple_schema(properties, vec!["query".to_string()]),
            }
        }

        async fn invoke(&self, _input: &str) -> Result<ToolResult> {
            Ok(ToolResult::success("ok"))
        }
    }

    #[test]
    fn test_system_message_renders_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool)).unwrap();

        let message = PromptFormatter::new().system_message(&registry);

        assert_eq!(message.role, MessageRole::System);
        assert!(message.content.contains("- web_search: Search the web"));
        assert!(message.content.contains("should be one of [web_search]"));
        assert!(!message.content.contains("{tool_descriptions}"));
        assert!(!message.content.contains("{tool_names}"));
    }

    #[test]
    fn test_observation_wrapped_as_user_turn() {
        let message = PromptFormatter::observation_message("1. Title\n   Snippet");

        assert_eq!(message.role, MessageRole::User);
        assert!(message.content.starts_with("Observation: 1. Title"));
    }

    #[test]
    fn test_custom_header() {
        let formatter = PromptFormatter::with_system_header("Tools: {tool_names}");
        let registry = ToolRegistry::new();

        let message = formatter.system_message(&registry);
        assert_eq!(message.content, "Tools: ");
    }
}
