use anyhow::{Context, Result};
use chat_client::ChatClient;
use dotenvy::dotenv;
use enrichment::security::SecretString;
use enrichment::types::config::DEFAULT_MODEL;
use enrichment::{
    Enricher, ExtractionConfig, SearchConfig, SerpWebSearcher, ServiceAccountKey, SheetsClient,
    SourceLoader,
};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_SEARCH_LOCATION: &str = "India";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub serpapi_api_key: SecretString,
    pub groq_api_key: SecretString,
    pub groq_base_url: Option<String>,
    pub groq_model: String,
    pub groq_timeout: Duration,
    pub search_location: Option<String>,
    pub google_credentials: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} must be set", name))
        };

        Ok(Self {
            serpapi_api_key: SecretString::new(required("SERPAPI_API_KEY")?),
            groq_api_key: SecretString::new(required("GROQ_API_KEY")?),
            groq_base_url: lookup("GROQ_BASE_URL").filter(|v| !v.is_empty()),
            groq_model: lookup("GROQ_MODEL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            groq_timeout: match lookup("GROQ_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
                Some(secs) => Duration::from_secs(
                    secs.trim()
                        .parse()
                        .context("GROQ_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => chat_client::DEFAULT_TIMEOUT,
            },
            // Set but empty means "no location"
            search_location: match lookup("SEARCH_LOCATION") {
                Some(location) if location.trim().is_empty() => None,
                Some(location) => Some(location),
                None => Some(DEFAULT_SEARCH_LOCATION.to_string()),
            },
            google_credentials: lookup("GOOGLE_APPLICATION_CREDENTIALS")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::new().with_location(self.search_location.clone())
    }

    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig::new().with_model(&self.groq_model)
    }

    pub fn chat_client(&self) -> Result<ChatClient> {
        let client = ChatClient::groq(self.groq_api_key.expose())
            .with_timeout(self.groq_timeout)
            .context("Failed to build chat client")?;
        Ok(match &self.groq_base_url {
            Some(url) => client.with_base_url(url),
            None => client,
        })
    }

    pub fn enricher(&self) -> Result<Enricher<SerpWebSearcher, ChatClient>> {
        Ok(Enricher::with_config(
            SerpWebSearcher::with_config(self.serpapi_api_key.expose(), self.search_config()),
            self.chat_client()?,
            self.extraction_config(),
        ))
    }

    pub fn source_loader(&self) -> Result<SourceLoader> {
        source_loader(self.google_credentials.as_deref())
    }
}

/// Loader for CSV files, plus Google Sheets when a key file is given.
pub fn source_loader(credentials: Option<&Path>) -> Result<SourceLoader> {
    let loader = SourceLoader::new();
    let Some(path) = credentials else {
        return Ok(loader);
    };

    let key = ServiceAccountKey::from_file(path)
        .with_context(|| format!("Failed to load service account key {}", path.display()))?;
    Ok(loader.with_sheets(SheetsClient::new(key)))
}

/// Source loader configured from `GOOGLE_APPLICATION_CREDENTIALS` alone.
pub fn source_loader_from_env() -> Result<SourceLoader> {
    let _ = dotenv();
    let credentials = env::var("GOOGLE_APPLICATION_CREDENTIALS")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    source_loader(credentials.as_deref())
}
