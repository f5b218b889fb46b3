//! SerpAPI-backed web searcher.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::SearchError;
use crate::security::SecretString;
use crate::traits::searcher::{OrganicResult, WebSearcher};
use crate::types::config::SearchConfig;

/// SerpAPI search response; everything but organic results is ignored.
#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,

    /// Set when the engine found nothing, alongside a 200 status.
    #[serde(default)]
    error: Option<String>,
}

/// Web searcher for SerpAPI's Google endpoint.
///
/// One GET per query, no retries.
pub struct SerpWebSearcher {
    client: reqwest::Client,
    api_key: SecretString,
    config: SearchConfig,
}

impl SerpWebSearcher {
    /// Create a new searcher with default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, SearchConfig::default())
    }

    /// Create a new searcher with explicit settings.
    pub fn with_config(api_key: impl Into<String>, config: SearchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: SecretString::new(api_key),
            config,
        }
    }

    /// Use a pre-built HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api_key", self.api_key.expose().to_string()),
            ("q", query.to_string()),
            ("engine", self.config.engine.clone()),
            ("google_domain", self.config.google_domain.clone()),
            ("num", self.config.num_results.to_string()),
            ("output", "json".to_string()),
        ];
        if let Some(location) = &self.config.location {
            params.push(("location", location.clone()));
        }
        params
    }
}

#[async_trait]
impl WebSearcher for SerpWebSearcher {
    async fn search(&self, query: &str) -> Result<Vec<OrganicResult>, SearchError> {
        let response = self
            .client
            .get(format!("{}/search", self.config.base_url))
            .query(&self.params(query))
            .send()
            .await
            .map_err(redact)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(redact)?;
        let serp: SerpResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Parse(e.to_string()))?;

        if let Some(error) = &serp.error {
            debug!(query, error = %error, "SerpAPI reported no results");
        }
        debug!(query, count = serp.organic_results.len(), "SerpAPI search");

        Ok(serp.organic_results)
    }
}

/// The request URL carries the API key as a query parameter.
fn redact(err: reqwest::Error) -> SearchError {
    SearchError::Http(err.without_url())
}
