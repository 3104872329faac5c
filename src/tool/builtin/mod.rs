//! Builtin tools shipped with the crate.

pub mod web_search;

pub use web_search::{SearchBackend, SearchResult, TavilyBackend, WebSearchTool};
