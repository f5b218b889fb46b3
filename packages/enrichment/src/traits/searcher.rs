//! Web searcher trait.
//!
//! Each entity's rendered query is sent to a search provider; only the
//! snippet of the first organic result feeds extraction.
//!
//! # Implementations
//!
//! - `SerpWebSearcher` - SerpAPI (Google results)
//! - `MockWebSearcher` - For testing

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SearchError;

/// One ranked organic search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganicResult {
    /// Rank as reported by the provider.
    #[serde(default)]
    pub position: Option<u32>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    /// Short excerpt of the page.
    #[serde(default)]
    pub snippet: Option<String>,
}

impl OrganicResult {
    /// A result carrying only a snippet.
    pub fn with_snippet(snippet: impl Into<String>) -> Self {
        Self {
            snippet: Some(snippet.into()),
            ..Default::default()
        }
    }
}

/// Web search trait.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Ranked organic results for `query`.
    async fn search(&self, query: &str) -> Result<Vec<OrganicResult>, SearchError>;

    /// Snippet of the first organic result.
    ///
    /// `Ok(None)` when there are no results or the first one has an empty
    /// snippet. Later results are never consulted.
    async fn first_snippet(&self, query: &str) -> Result<Option<String>, SearchError> {
        let results = self.search(query).await?;

        let Some(first) = results.into_iter().next() else {
            warn!(query, "No organic results for query");
            return Ok(None);
        };

        match first.snippet.filter(|s| !s.is_empty()) {
            Some(snippet) => {
                debug!(query, snippet = %snippet, "Found search snippet");
                Ok(Some(snippet))
            }
            None => {
                warn!(query, "No snippet found for query");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<T: WebSearcher + ?Sized> WebSearcher for std::sync::Arc<T> {
    async fn search(&self, query: &str) -> Result<Vec<OrganicResult>, SearchError> {
        (**self).search(query).await
    }
}

/// Canned reply for a query.
#[derive(Debug, Clone)]
enum MockSearchReply {
    Results(Vec<OrganicResult>),
    Status(u16),
}

/// Mock web searcher for testing.
///
/// Unknown queries return no results.
#[derive(Default)]
pub struct MockWebSearcher {
    replies: RwLock<HashMap<String, MockSearchReply>>,
    queries: RwLock<Vec<String>>,
}

impl MockWebSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results for a query.
    pub fn with_results(self, query: &str, results: Vec<OrganicResult>) -> Self {
        self.replies
            .write()
            .unwrap()
            .insert(query.to_string(), MockSearchReply::Results(results));
        self
    }

    /// Add a single snippet result for a query.
    pub fn with_snippet(self, query: &str, snippet: &str) -> Self {
        self.with_results(query, vec![OrganicResult::with_snippet(snippet)])
    }

    /// Make a query fail with an HTTP status.
    pub fn with_status(self, query: &str, status: u16) -> Self {
        self.replies
            .write()
            .unwrap()
            .insert(query.to_string(), MockSearchReply::Status(status));
        self
    }

    /// Queries received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str) -> Result<Vec<OrganicResult>, SearchError> {
        self.queries.write().unwrap().push(query.to_string());

        let reply = self.replies.read().unwrap().get(query).cloned();
        match reply {
            Some(MockSearchReply::Results(results)) => Ok(results),
            Some(MockSearchReply::Status(status)) => Err(SearchError::Status { status }),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_snippet_uses_first_result_only() {
        let searcher = MockWebSearcher::new().with_results(
            "email of OpenAI",
            vec![
                OrganicResult::default(),
                OrganicResult::with_snippet("Contact email: info@openai.com."),
            ],
        );

        assert_eq!(searcher.first_snippet("email of OpenAI").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_first_snippet_found() {
        let searcher = MockWebSearcher::new().with_snippet("q", "Contact email: info@openai.com.");

        assert_eq!(
            searcher.first_snippet("q").await.unwrap().as_deref(),
            Some("Contact email: info@openai.com.")
        );
        assert_eq!(searcher.queries(), vec!["q"]);
    }

    #[tokio::test]
    async fn test_first_snippet_empty_string_is_absent() {
        let searcher = MockWebSearcher::new().with_snippet("q", "");
        assert_eq!(searcher.first_snippet("q").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_no_results() {
        let searcher = MockWebSearcher::new();
        assert_eq!(searcher.first_snippet("Acme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_status_error_propagates() {
        let searcher = MockWebSearcher::new().with_status("q", 429);
        let err = searcher.first_snippet("q").await.unwrap_err();
        assert!(matches!(err, SearchError::Status { status: 429 }));
    }
}
