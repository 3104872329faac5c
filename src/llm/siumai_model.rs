//! Siumai-backed language model client.
//!
//! Wraps a siumai client behind the [`LanguageModel`] trait, supporting
//! multiple providers (`OpenAI`, Anthropic, Ollama) with a consistent
//! interface. Credentials are injected at construction time; the crate never
//! reads them from the environment.

use crate::{
    error::{AgentError, Result},
    llm::{GenerationOptions, LanguageModel, TokenStream},
    types::{ChatMessage, MessageRole},
};
use async_trait::async_trait;
use futures::StreamExt;
use siumai::prelude::*;
use std::sync::Arc;

/// Language model client backed by siumai
pub struct SiumaiModel {
    /// The underlying siumai client
    client: Arc<dyn ChatCapability>,
    /// Generation parameters the client was built with
    options: GenerationOptions,
}

impl std::fmt::Debug for SiumaiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiumaiModel")
            .field("options", &self.options)
            .field("client", &"<ChatCapability>")
            .finish()
    }
}

impl SiumaiModel {
    /// Create an `OpenAI` client
    pub async fn openai(api_key: impl Into<String>, options: GenerationOptions) -> Result<Self> {
        let mut builder = LlmBuilder::new()
            .openai()
            .api_key(api_key.into())
            .model(&options.model)
            .temperature(options.temperature);

        if let Some(max_tokens) = options.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        let client = builder
            .build()
            .await
            .map_err(|e| AgentError::llm(format!("Failed to build OpenAI client: {e}")))?;

        Ok(Self {
            client: Arc::new(client),
            options,
        })
    }

    /// Create an Anthropic client
    pub async fn anthropic(api_key: impl Into<String>, options: GenerationOptions) -> Result<Self> {
        let mut builder = LlmBuilder::new()
            .anthropic()
            .api_key(api_key.into())
            .model(&options.model)
            .temperature(options.temperature);

        if let Some(max_tokens) = options.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        let client = builder
            .build()
            .await
            .map_err(|e| AgentError::llm(format!("Failed to build Anthropic client: {e}")))?;

        Ok(Self {
            client: Arc::new(client),
            options,
        })
    }

    /// Create an Ollama client against a local or remote endpoint
    pub async fn ollama(base_url: impl Into<String>, options: GenerationOptions) -> Result<Self> {
        let mut builder = LlmBuilder::new()
            .ollama()
            .base_url(base_url.into())
            .model(&options.model)
            .temperature(options.temperature);

        if let Some(max_tokens) = options.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        let client = builder
            .build()
            .await
            .map_err(|e| AgentError::llm(format!("Failed to build Ollama client: {e}")))?;

        Ok(Self {
            client: Arc::new(client),
            options,
        })
    }

    /// Wrap an existing siumai client
    pub fn from_client(client: Arc<dyn ChatCapability>, options: GenerationOptions) -> Self {
        Self { client, options }
    }

    /// Get the generation options
    #[must_use]
    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Convert transcript messages into siumai format
    fn to_siumai_messages(messages: &[ChatMessage]) -> Vec<siumai::types::ChatMessage> {
        messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::User => siumai::types::ChatMessage::user(&msg.content).build(),
                MessageRole::System => siumai::types::ChatMessage::system(&msg.content).build(),
                MessageRole::Assistant | MessageRole::Tool => {
                    siumai::types::ChatMessage::assistant(&msg.content).build()
                }
            })
            .collect()
    }
}

#[async_trait]
impl LanguageModel for SiumaiModel {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let siumai_messages = Self::to_siumai_messages(messages);

        let response = self
            .client
            .chat(siumai_messages)
            .await
            .map_err(|e| AgentError::llm(format!("Chat request failed: {e}")))?;

        Ok(response.content.all_text())
    }

    async fn chat_stream(&self, messages: &[ChatMessage]) -> Result<TokenStream> {
        let siumai_messages = Self::to_siumai_messages(messages);

        let stream = self
            .client
            .chat_stream(siumai_messages, None)
            .await
            .map_err(|e| AgentError::llm(format!("Failed to start streaming: {e}")))?;

        let mapped = stream.map(|chunk| {
            chunk
                .map(|event| match event {
                    siumai::types::ChatStreamEvent::ContentDelta { delta, .. } => delta,
                    siumai::types::ChatStreamEvent::ThinkingDelta { delta } => delta,
                    // StreamEnd and other events carry no new text; the
                    // deltas already delivered the full output.
                    _ => String::new(),
                })
                .map_err(|e| AgentError::llm(format!("Stream error: {e}")))
        });

        Ok(Box::pin(mapped))
    }
}
