//! Core types and data structures for the webquest agent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AgentError;

/// Message role in conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction prefix
    System,
    /// User message
    User,
    /// Assistant/model message
    Assistant,
    /// Tool response message
    Tool,
}

/// A single turn in the running conversation the model sees
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Unique message identifier
    pub id: Uuid,
    /// Message role
    pub role: MessageRole,
    /// Message content
    pub content: String,
    /// Timestamp when the message was created
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message with the given role and content
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Create a tool message
    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Tool, content)
    }
}

/// Append-only conversation state owned by one loop execution.
///
/// The transcript grows monotonically while a run is in flight and is
/// discarded when the run terminates; tools only ever read from it through
/// the prompt, never mutate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Create an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Get the ordered turns
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of turns recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check whether the transcript is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Execution statistics for one agent run
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Reasoning iterations performed
    pub iterations: usize,
    /// Model calls made
    pub model_calls: usize,
    /// Tool calls dispatched
    pub tool_calls: usize,
    /// Tool calls that failed
    pub failed_tool_calls: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

/// Terminal result of one agent query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAnswer {
    /// Final answer text, verbatim as the model produced it
    pub text: String,
    /// Source URLs collected from search observations during the run
    pub citations: Vec<String>,
    /// True when the text is an error description rather than a real answer
    pub degraded: bool,
    /// Execution statistics
    pub stats: ExecutionStats,
}

impl AgentAnswer {
    /// Build a degraded answer carrying an error description as its text.
    ///
    /// Returned by the retry wrapper after all attempts are exhausted so the
    /// caller gets a non-crashing, conversational outcome.
    #[must_use]
    pub fn from_error(error: &AgentError) -> Self {
        Self {
            text: error.to_string(),
            citations: Vec::new(),
            degraded: true,
            stats: ExecutionStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_is_append_only() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.push(ChatMessage::system("You are a helpful assistant."));
        transcript.push(ChatMessage::user("What is the capital of France?"));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].role, MessageRole::System);
        assert_eq!(transcript.messages()[1].content, "What is the capital of France?");
    }

    #[test]
    fn test_message_constructors() {
        let msg = ChatMessage::assistant("Final Answer: Paris");
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.content, "Final Answer: Paris");
    }

    #[test]
    fn test_degraded_answer_carries_error_text() {
        let answer = AgentAnswer::from_error(&AgentError::llm("service unavailable"));
        assert!(answer.degraded);
        assert!(answer.text.contains("service unavailable"));
        assert!(answer.citations.is_empty());
    }
}
