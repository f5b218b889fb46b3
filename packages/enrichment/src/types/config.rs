//! Configuration types for searching and extraction.

use serde::{Deserialize, Serialize};

/// SerpAPI endpoint root.
pub const SERPAPI_BASE_URL: &str = "https://serpapi.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// System instruction sent with every extraction request.
pub const EXTRACTION_SYSTEM_PROMPT: &str =
    "You are an assistant that extracts specific information.";

/// Configuration for the web search client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// API root; `/search` is appended.
    pub base_url: String,

    /// Search engine to query through the API.
    ///
    /// Default: "google".
    pub engine: String,

    /// Engine domain.
    ///
    /// Default: "google.com".
    pub google_domain: String,

    /// Geographic location hint. `None` leaves it to the API.
    ///
    /// Default: "India".
    pub location: Option<String>,

    /// Result-count hint sent with each query. Only the first result is read.
    ///
    /// Default: 3.
    pub num_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: SERPAPI_BASE_URL.to_string(),
            engine: "google".to_string(),
            google_domain: "google.com".to_string(),
            location: Some("India".to_string()),
            num_results: 3,
        }
    }
}

impl SearchConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root (useful for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set or clear the location hint.
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location.filter(|l| !l.trim().is_empty());
        self
    }
}

/// Configuration for the extraction client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Chat model identifier.
    pub model: String,

    /// System role instruction.
    pub system_prompt: String,

    /// Sampling temperature. Kept at 0 so repeated runs agree.
    pub temperature: f32,

    /// Completion token ceiling.
    ///
    /// Default: 512.
    pub max_tokens: u32,

    /// Nucleus sampling mass.
    ///
    /// Default: 1.0.
    pub top_p: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: EXTRACTION_SYSTEM_PROMPT.to_string(),
            temperature: 0.0,
            max_tokens: 512,
            top_p: 1.0,
        }
    }
}

impl ExtractionConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.num_results, 3);
        assert_eq!(config.location.as_deref(), Some("India"));
        assert_eq!(config.base_url, "https://serpapi.com");
    }

    #[test]
    fn test_blank_location_clears() {
        let config = SearchConfig::new().with_location(Some("  ".into()));
        assert_eq!(config.location, None);
    }

    #[test]
    fn test_extraction_defaults_are_deterministic() {
        let config = ExtractionConfig::default();
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.model, "llama3-70b-8192");
    }
}
