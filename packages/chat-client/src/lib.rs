//! Pure chat-completion REST client
//!
//! A minimal client for OpenAI-compatible chat completion endpoints with no
//! domain-specific logic. Defaults to Groq's OpenAI-compatible API.
//!
//! # Example
//!
//! ```rust,ignore
//! use chat_client::{ChatClient, ChatRequest, Message};
//!
//! let client = ChatClient::from_env()?;
//!
//! let response = client
//!     .chat_completion(
//!         &ChatRequest::new("llama3-70b-8192")
//!             .message(Message::system("You are terse."))
//!             .message(Message::user("Hello!"))
//!             .temperature(0.0),
//!     )
//!     .await?;
//!
//! println!("{:?}", response.first_content());
//! ```

pub mod error;
pub mod types;

pub use error::{ChatError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

/// Groq's OpenAI-compatible endpoint.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Per-request timeout applied unless overridden with [`ChatClient::with_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Chat completion API client.
#[derive(Clone)]
pub struct ChatClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ChatClient {
    /// Create a client for Groq with the given API key.
    ///
    /// Requests time out after [`DEFAULT_TIMEOUT`].
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: GROQ_BASE_URL.to_string(),
        }
    }

    /// Alias of [`ChatClient::new`] that reads better at call sites.
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self::new(api_key)
    }

    /// Create from environment variable `GROQ_API_KEY`.
    ///
    /// `GROQ_BASE_URL` overrides the endpoint when set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| ChatError::Config("GROQ_API_KEY not set".into()))?;
        let client = Self::new(api_key);
        Ok(match std::env::var("GROQ_BASE_URL") {
            Ok(url) if !url.is_empty() => client.with_base_url(url),
            _ => client,
        })
    }

    /// Set a custom base URL (for proxies, other providers, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound each request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Returns every choice the API produced; an empty choice list or a
    /// null message content is not treated as an error here.
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "chat completion request failed");
                ChatError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "chat completion API error");
            return Err(ChatError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ChatError::Parse(e.to_string()))?;

        debug!(
            model = %request.model,
            choices = chat_response.choices.len(),
            duration_ms = start.elapsed().as_millis(),
            "chat completion"
        );

        Ok(chat_response)
    }
}
