//! Language model service boundary.
//!
//! The agent loop talks to the model through the [`LanguageModel`] trait so
//! the reasoning logic can be exercised against scripted stand-ins in tests.
//! The shipped implementation, [`SiumaiModel`], wraps a siumai client and
//! supports both blocking and token-streamed generation.

use crate::error::Result;
use crate::types::ChatMessage;
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

pub mod siumai_model;

pub use siumai_model::SiumaiModel;

/// Stream of incremental token chunks terminated by the end of generation
pub type TokenStream = BoxStream<'static, Result<String>>;

/// Generation parameters supplied externally at construction time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model deployment identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            max_tokens: Some(1024),
        }
    }
}

impl GenerationOptions {
    /// Create options for the given model deployment
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum number of generated tokens
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A language model service the loop can converse with
#[async_trait]
pub trait LanguageModel: Send + Sync + std::fmt::Debug {
    /// Generate a completion for the given conversation, blocking until the
    /// full output text is available
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Generate a completion delivered as an incremental token stream.
    ///
    /// The default implementation degrades to a single-chunk stream wrapping
    /// [`LanguageModel::chat`], so implementations without native streaming
    /// support still satisfy the streaming call path.
    async fn chat_stream(&self, messages: &[ChatMessage]) -> Result<TokenStream> {
        let text = self.chat(messages).await?;
        Ok(Box::pin(futures::stream::once(async move { Ok(text) })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[derive(Debug)]
    struct FixedModel;

    #[async_trait]
    impl LanguageModel for FixedModel {
        async fn chat(&self, _messages: &[ChatMessage]) -> Result<String> {
            Ok("Final Answer: 42".to_string())
        }
    }

    #[test]
    fn test_options_builder() {
        let options = GenerationOptions::new("gpt-4o")
            .with_temperature(0.0)
            .with_max_tokens(512);

        assert_eq!(options.model, "gpt-4o");
        assert_eq!(options.temperature, 0.0);
        assert_eq!(options.max_tokens, Some(512));
    }

    #[tokio::test]
    async fn test_default_stream_wraps_chat() {
        let model = FixedModel;
        let mut stream = model.chat_stream(&[]).await.unwrap();

        let chunk = stream.next().await.unwrap().unwrap();
        assert_eq!(chunk, "Final Answer: 42");
        assert!(stream.next().await.is_none());
    }
}
