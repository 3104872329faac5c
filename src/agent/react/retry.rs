//! Query-level retry wrapper.
//!
//! Model output is not always well-formed, so a whole run is retried from
//! scratch: conversation state is discarded between attempts, there is no
//! backoff, and no partial-state reuse. Unlike a blind catch-all, the
//! wrapper consults [`AgentError::is_retryable`] and gives up immediately on
//! permanent errors.

use crate::{
    agent::react::agent::ReActAgent,
    error::AgentError,
    types::AgentAnswer,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Retry policy for whole-query attempts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts; values below 1 are treated as 1
    pub max_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 2 }
    }
}

impl RetryPolicy {
    /// Create a policy with the default attempt count
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of attempts
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Run the agent up to `policy.max_attempts` times and always come back
/// with an answer.
///
/// Returns the first successful [`AgentAnswer`]. After exhausting attempts
/// (or hitting a permanent error), the last error's description is returned
/// as a degraded answer rather than surfacing to the caller as a failure,
/// preserving conversational continuity at the cost of occasionally
/// presenting raw error text as if it were an answer.
pub async fn run_with_retry(
    agent: &ReActAgent,
    question: &str,
    policy: &RetryPolicy,
) -> AgentAnswer {
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error: Option<AgentError> = None;

    for attempt in 1..=max_attempts {
        debug!("Agent attempt {}/{} started", attempt, max_attempts);

        match agent.run(question).await {
            Ok(answer) => return answer,
            Err(e) => {
                warn!("Agent attempt {}/{} failed: {}", attempt, max_attempts, e);
                let retryable = e.is_retryable();
                last_error = Some(e);

                if !retryable {
                    debug!("Error is permanent, skipping remaining attempts");
                    break;
                }
            }
        }
    }

    let error =
        last_error.unwrap_or_else(|| AgentError::configuration("retry loop made no attempts"));

    AgentAnswer::from_error(&error)
}
