//! Progress observer side channel.
//!
//! The agent loop mirrors every intermediate step (model calls, streamed
//! tokens, tool invocations, the terminal outcome) to a [`ProgressObserver`]
//! as it happens. Observers are display-only: they receive events in the
//! exact order the loop produces them and must never alter control flow.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// A single progress notification emitted by the agent loop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// A query run began
    RunStarted {
        /// The user's question
        question: String,
    },
    /// A model call is about to be issued
    ModelCallStarted {
        /// 1-based reasoning iteration
        iteration: usize,
    },
    /// An incremental token arrived from the model stream
    Token {
        /// Token text
        text: String,
    },
    /// A model call completed with the full output text
    ModelCallFinished {
        /// 1-based reasoning iteration
        iteration: usize,
        /// Complete model output for this call
        text: String,
    },
    /// A tool invocation started
    ToolStarted {
        /// Tool name
        tool_name: String,
        /// Raw action input
        input: String,
    },
    /// A tool invocation finished
    ToolFinished {
        /// Tool name
        tool_name: String,
        /// Observation text fed back to the model
        output: String,
        /// Whether the invocation failed
        is_error: bool,
    },
    /// The model produced its final answer
    FinalAnswer {
        /// Answer text
        text: String,
    },
    /// The run terminated with an error
    RunFailed {
        /// Error description
        error: String,
    },
}

/// Sink for agent progress notifications.
///
/// Invoked synchronously and in-order from the loop. Implementations must
/// not block and must swallow their own failures; the loop ignores whatever
/// happens inside `notify`.
pub trait ProgressObserver: Send + Sync + std::fmt::Debug {
    /// Receive one progress event
    fn notify(&self, event: &AgentEvent);
}

/// Observer that discards all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn notify(&self, _event: &AgentEvent) {}
}

/// Observer that forwards events into an unbounded channel for a display
/// layer to consume at its own pace.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<AgentEvent>,
}

impl ChannelObserver {
    /// Create an observer together with the receiving end of its channel
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AgentEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ProgressObserver for ChannelObserver {
    fn notify(&self, event: &AgentEvent) {
        // A closed channel means the display side went away; the event is
        // dropped and the run continues.
        if self.sender.send(event.clone()).is_err() {
            debug!("progress channel closed, dropping event");
        }
    }
}
