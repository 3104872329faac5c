//! Agent implementations.

pub mod react;

pub use react::{OutputParser, ParsedStep, ReActAgent, ReActConfig, RetryPolicy, run_with_retry};
