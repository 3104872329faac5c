//! # Webquest
//!
//! A streaming single-tool ReAct agent: wire a language model to a web
//! search backend and answer natural-language questions with live internet
//! results, mirroring every intermediate step to a progress observer.
//!
//! The crate provides:
//!
//! - **Agent loop**: a ReAct controller that parses model output into typed
//!   steps, dispatches actions to the registered tool, and feeds
//!   observations back into the conversation until a final answer appears
//! - **Tool system**: a [`Tool`](tool::Tool) trait, a registry, and a
//!   builtin web search tool over a pluggable [`SearchBackend`](tool::builtin::SearchBackend)
//! - **Model boundary**: a [`LanguageModel`](llm::LanguageModel) trait with
//!   a siumai-backed implementation supporting blocking and token-streamed
//!   generation
//! - **Progress observer**: an ordered, side-channel event stream for
//!   display layers
//! - **Retry wrapper**: whole-query retries with typed-error classification
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use webquest::prelude::*;
//!
//! # async fn example() -> webquest::Result<()> {
//! let backend = Arc::new(TavilyBackend::new("tavily-api-key"));
//! let mut tools = ToolRegistry::new();
//! tools.register(Arc::new(WebSearchTool::new(backend)))?;
//!
//! let model = SiumaiModel::openai("openai-api-key", GenerationOptions::default()).await?;
//! let agent = ReActAgent::new(ReActConfig::default(), Arc::new(tools), Arc::new(model));
//!
//! let answer = run_with_retry(&agent, "Who won the 2022 World Cup?", &RetryPolicy::default()).await;
//! println!("{}", answer.text);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod error;
pub mod llm;
pub mod observer;
pub mod tool;
pub mod types;

pub use agent::react::{ReActAgent, ReActConfig, RetryPolicy, run_with_retry};
pub use error::{AgentError, Result};
pub use types::{AgentAnswer, ChatMessage, ExecutionStats, MessageRole, Transcript};

/// Commonly used types and traits, re-exported for convenience
pub mod prelude {
    pub use crate::agent::react::{
        OutputParser, ParsedStep, PromptFormatter, ReActAgent, ReActConfig, RetryPolicy,
        run_with_retry,
    };
    pub use crate::error::{AgentError, Result};
    pub use crate::llm::{GenerationOptions, LanguageModel, SiumaiModel, TokenStream};
    pub use crate::observer::{AgentEvent, ChannelObserver, NullObserver, ProgressObserver};
    pub use crate::tool::builtin::{SearchBackend, SearchResult, TavilyBackend, WebSearchTool};
    pub use crate::tool::{Tool, ToolRegistry, ToolResult, ToolSchema};
    pub use crate::types::{AgentAnswer, ChatMessage, ExecutionStats, MessageRole, Transcript};
}

/// Version information for the webquest library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
