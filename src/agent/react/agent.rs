//! The ReAct controller loop.

use crate::{
    agent::react::{
        parser::{OutputParser, ParsedStep},
        prompt::PromptFormatter,
    },
    error::{AgentError, Result},
    llm::LanguageModel,
    observer::{AgentEvent, NullObserver, ProgressObserver},
    tool::ToolRegistry,
    types::{AgentAnswer, ChatMessage, ExecutionStats, Transcript},
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Instant};
use tracing::{debug, info, warn};

/// ReAct agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReActConfig {
    /// Maximum number of reasoning iterations before the run fails
    pub max_iterations: usize,
    /// Whether model output is consumed as a token stream and mirrored to
    /// the observer token by token
    pub streaming: bool,
}

impl Default for ReActConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            streaming: false,
        }
    }
}

impl ReActConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of reasoning iterations
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable token streaming
    #[must_use]
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }
}

/// ReAct agent mediating between a language model and a tool registry.
///
/// One [`run`](ReActAgent::run) owns its conversation state exclusively:
/// the transcript is created fresh, grows append-only while the loop is in
/// flight, and is discarded when the loop terminates. Tool dispatch is
/// strictly sequential; at most one action is being resolved at a time.
#[derive(Debug)]
pub struct ReActAgent {
    config: ReActConfig,
    tools: Arc<ToolRegistry>,
    model: Arc<dyn LanguageModel>,
    parser: OutputParser,
    formatter: PromptFormatter,
    observer: Arc<dyn ProgressObserver>,
}

impl ReActAgent {
    /// Create a new agent over the given tools and model
    pub fn new(config: ReActConfig, tools: Arc<ToolRegistry>, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            config,
            tools,
            model,
            parser: OutputParser::new(),
            formatter: PromptFormatter::new(),
            observer: Arc::new(NullObserver),
        }
    }

    /// Attach a progress observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Override the system header template
    #[must_use]
    pub fn with_system_header(mut self, header: impl Into<String>) -> Self {
        self.formatter = PromptFormatter::with_system_header(header);
        self
    }

    /// Get the agent configuration
    #[must_use]
    pub fn config(&self) -> &ReActConfig {
        &self.config
    }

    /// Answer one question, looping through reasoning iterations until the
    /// model produces a final answer or the iteration cap is reached.
    pub async fn run(&self, question: &str) -> Result<AgentAnswer> {
        let started = Instant::now();
        let mut transcript = Transcript::new();
        transcript.push(self.formatter.system_message(&self.tools));
        transcript.push(ChatMessage::user(question));

        let mut stats = ExecutionStats::default();
        let mut citations: Vec<String> = Vec::new();

        self.notify(AgentEvent::RunStarted {
            question: question.to_string(),
        });

        for iteration in 1..=self.config.max_iterations {
            stats.iterations = iteration;
            debug!("Reasoning iteration {} started", iteration);

            self.notify(AgentEvent::ModelCallStarted { iteration });

            let output = match self.call_model(&transcript).await {
                Ok(output) => output,
                Err(e) => {
                    self.notify(AgentEvent::RunFailed {
                        error: e.to_string(),
                    });
                    return Err(e);
                }
            };
            stats.model_calls += 1;

            self.notify(AgentEvent::ModelCallFinished {
                iteration,
                text: output.clone(),
            });

            match self.parser.parse(&output) {
                ParsedStep::FinalAnswer { text, .. } => {
                    info!("Final answer produced after {} iterations", iteration);
                    self.notify(AgentEvent::FinalAnswer { text: text.clone() });
                    stats.duration_ms = elapsed_ms(started);

                    return Ok(AgentAnswer {
                        text,
                        citations,
                        degraded: false,
                        stats,
                    });
                }
                ParsedStep::Action {
                    tool_name, input, ..
                } => {
                    transcript.push(ChatMessage::assistant(&output));
                    let observation = self
                        .dispatch(&tool_name, &input, &mut stats, &mut citations)
                        .await;
                    transcript.push(PromptFormatter::observation_message(&observation));
                }
                ParsedStep::Malformed { .. } => {
                    warn!(
                        "Model output matched neither an Action nor a Final Answer at iteration {}",
                        iteration
                    );
                    transcript.push(ChatMessage::assistant(&output));
                    transcript.push(PromptFormatter::correction_message());
                }
            }
        }

        stats.duration_ms = elapsed_ms(started);
        let error = AgentError::incomplete_reasoning(self.config.max_iterations);
        self.notify(AgentEvent::RunFailed {
            error: error.to_string(),
        });

        Err(error)
    }

    /// Issue one model call over the current transcript, streaming tokens to
    /// the observer when configured to.
    async fn call_model(&self, transcript: &Transcript) -> Result<String> {
        if self.config.streaming {
            let mut stream = self.model.chat_stream(transcript.messages()).await?;
            let mut buffer = String::new();

            while let Some(chunk) = stream.next().await {
                let token = chunk?;
                if token.is_empty() {
                    continue;
                }
                self.notify(AgentEvent::Token {
                    text: token.clone(),
                });
                buffer.push_str(&token);
            }

            Ok(buffer)
        } else {
            self.model.chat(transcript.messages()).await
        }
    }

    /// Resolve one action to an observation string.
    ///
    /// Never fails: an unknown tool name and a failing tool both come back
    /// as observations describing the problem, so the model can recover on
    /// the next iteration.
    async fn dispatch(
        &self,
        tool_name: &str,
        input: &str,
        stats: &mut ExecutionStats,
        citations: &mut Vec<String>,
    ) -> String {
        let Some(tool) = self.tools.get(tool_name) else {
            warn!("Model requested unregistered tool '{}'", tool_name);
            return format!(
                "Unknown tool '{}'. Available tools: {}",
                tool_name,
                self.tools.tool_names().join(", ")
            );
        };

        self.notify(AgentEvent::ToolStarted {
            tool_name: tool_name.to_string(),
            input: input.to_string(),
        });
        stats.tool_calls += 1;

        let (observation, is_error) = match tool.invoke(input).await {
            Ok(result) => {
                if let Some(sources) = result.metadata.get("sources").and_then(|v| v.as_array()) {
                    citations.extend(
                        sources
                            .iter()
                            .filter_map(|v| v.as_str().map(str::to_string)),
                    );
                }

                if result.success {
                    (result.content, false)
                } else {
                    stats.failed_tool_calls += 1;
                    let message = result
                        .error
                        .unwrap_or_else(|| "unknown tool failure".to_string());
                    (format!("Tool '{tool_name}' failed: {message}"), true)
                }
            }
            Err(e) => {
                stats.failed_tool_calls += 1;
                (format!("Tool '{tool_name}' failed: {e}"), true)
            }
        };

        self.notify(AgentEvent::ToolFinished {
            tool_name: tool_name.to_string(),
            output: observation.clone(),
            is_error,
        });

        observation
    }

    /// Mirror one event to the observer; observers never affect control flow
    fn notify(&self, event: AgentEvent) {
        self.observer.notify(&event);
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
