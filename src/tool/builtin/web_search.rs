//! Web search tool backed by a pluggable search service.
//!
//! The tool forwards the action input as a query string to a
//! [`SearchBackend`] and formats the hits into an observation the model can
//! cite from. Each call is independent: no caching, no deduplication across
//! calls, no rate limiting.

use crate::{
    error::{AgentError, Result},
    tool::{Tool, ToolResult, ToolSchema, create_simple_schema, number_param, string_param},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, warn};

/// Default number of hits requested per search
pub const DEFAULT_RESULT_COUNT: usize = 5;

const TAVILY_BASE_URL: &str = "https://api.tavily.com";

/// One search hit returned by a backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Page title
    pub title: String,
    /// Short text snippet
    pub snippet: String,
    /// Source URL
    pub url: String,
}

/// External search service the tool delegates to.
///
/// A backend is expected to be deterministic for a fixed query against a
/// fixed index state: the same query yields the same ordered hits.
#[async_trait]
pub trait SearchBackend: Send + Sync + std::fmt::Debug {
    /// Run a query and return up to `count` ordered hits
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>>;
}

/// Search backend talking to the Tavily HTTP API
#[derive(Debug, Clone)]
pub struct TavilyBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyHit>,
}

#[derive(Debug, Deserialize)]
struct TavilyHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    url: String,
}

impl TavilyBackend {
    /// Create a backend with an injected API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: TAVILY_BASE_URL.to_string(),
        }
    }

    /// Override the API endpoint, e.g. for a proxy
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SearchBackend for TavilyBackend {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>> {
        let request = TavilyRequest {
            api_key: &self.api_key,
            query,
            max_results: count,
        };

        debug!("Searching for '{}' ({} results)", query, count);

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: TavilyResponse = response.json().await?;

        Ok(body
            .results
            .into_iter()
            .take(count)
            .map(|hit| SearchResult {
                title: hit.title,
                snippet: hit.content,
                url: hit.url,
            })
            .collect())
    }
}

/// Web search tool exposed to the agent
#[derive(Debug)]
pub struct WebSearchTool {
    name: String,
    backend: Arc<dyn SearchBackend>,
    result_count: usize,
    site: Option<String>,
}

impl WebSearchTool {
    /// Create a search tool over the given backend with default settings
    #[must_use]
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            name: "web_search".to_string(),
            backend,
            result_count: DEFAULT_RESULT_COUNT,
            site: None,
        }
    }

    /// Set the number of hits requested per search; must be positive
    pub fn with_result_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(AgentError::validation(
                "result_count",
                "result count must be a positive integer",
            ));
        }
        self.result_count = count;
        Ok(self)
    }

    /// Restrict all searches to one domain
    #[must_use]
    pub fn with_site(mut self, domain: impl Into<String>) -> Self {
        self.site = Some(domain.into());
        self
    }

    /// Get the configured result count
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.result_count
    }

    fn scoped_query(&self, query: &str) -> String {
        match &self.site {
            Some(domain) => format!("site:{domain} {query}"),
            None => query.to_string(),
        }
    }

    /// Format hits into a numbered observation keeping the URL per item, so
    /// downstream citation formatting has a source for every snippet
    fn format_results(results: &[SearchResult]) -> String {
        results
            .iter()
            .enumerate()
            .map(|(i, hit)| {
                format!(
                    "{}. {}\n   {}\n   Source: {}",
                    i + 1,
                    hit.title,
                    hit.snippet,
                    hit.url
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn schema(&self) -> ToolSchema {
        let mut properties = HashMap::new();
        properties.insert("query".to_string(), string_param("The search query"));
        properties.insert(
            "count".to_string(),
            number_param("Number of results to return"),
        );

        ToolSchema {
            name: self.name.clone(),
            description: "Search the web for current information. Returns titles, \
                          snippets, and source URLs for the top results."
                .to_string(),
            input_schema: create_simple_schema(properties, vec!["query".to_string()]),
        }
    }

    async fn invoke(&self, input: &str) -> Result<ToolResult> {
        let query = input.trim();
        if query.is_empty() {
            return Err(AgentError::validation(
                "query",
                "Search query must not be empty",
            ));
        }

        let query = self.scoped_query(query);

        let results = match self.backend.search(&query, self.result_count).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Search for '{}' failed: {}", query, e);
                return Err(AgentError::tool(&self.name, e.to_string()));
            }
        };

        if results.is_empty() {
            return Ok(ToolResult::success(format!(
                "No results found for '{query}'."
            )));
        }

        let sources: Vec<&str> = results.iter().map(|hit| hit.url.as_str()).collect();

        Ok(ToolResult::success(Self::format_results(&results))
            .with_metadata("query", serde_json::json!(query))
            .with_metadata("sources", serde_json::json!(sources)))
    }
}
