//! Error types for the chat client.

use thiserror::Error;

/// Result type for chat client operations.
pub type Result<T> = std::result::Result<T, ChatError>;

/// Chat client errors.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, invalid key)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ChatError {
    /// True when the request never got an answer in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChatError::Network(msg) if msg.contains("timed out"))
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Network(format!("request timed out: {}", err))
        } else if err.is_decode() {
            ChatError::Parse(err.to_string())
        } else {
            ChatError::Network(err.to_string())
        }
    }
}
