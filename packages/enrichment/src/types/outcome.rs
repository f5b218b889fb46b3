//! Per-entity extraction outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of extracting information for one entity.
///
/// Failures are kept apart from extracted text; [`ExtractionOutcome::render`]
/// produces the single cell value used in exported tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// The model answered with non-empty text.
    Extracted(String),

    /// Extraction did not produce a value.
    Failed(ExtractionFailure),
}

/// Why extraction did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ExtractionFailure {
    /// Snippet was empty or whitespace; the model was never called.
    EmptySnippet,

    /// The model returned a choice whose content was null or blank.
    EmptyContent,

    /// The model returned no choices at all.
    EmptyResponse,

    /// The completion call itself failed (network, auth, quota, parse).
    Api(String),
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionFailure::EmptySnippet => {
                f.write_str("Search snippets are empty. Cannot proceed with extraction.")
            }
            ExtractionFailure::EmptyContent => {
                f.write_str("Groq API returned content, but it was empty.")
            }
            ExtractionFailure::EmptyResponse => f.write_str("Groq API returned an empty response."),
            ExtractionFailure::Api(message) => write!(f, "Error during Groq API call: {}", message),
        }
    }
}

impl ExtractionOutcome {
    /// True if the model produced a value.
    pub fn is_extracted(&self) -> bool {
        matches!(self, ExtractionOutcome::Extracted(_))
    }

    /// Extracted text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractionOutcome::Extracted(text) => Some(text),
            ExtractionOutcome::Failed(_) => None,
        }
    }

    /// Failure, if any.
    pub fn failure(&self) -> Option<&ExtractionFailure> {
        match self {
            ExtractionOutcome::Extracted(_) => None,
            ExtractionOutcome::Failed(failure) => Some(failure),
        }
    }

    /// Cell value: the text itself, or the failure's message.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ExtractionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionOutcome::Extracted(text) => f.write_str(text),
            ExtractionOutcome::Failed(failure) => failure.fmt(f),
        }
    }
}

impl From<ExtractionFailure> for ExtractionOutcome {
    fn from(failure: ExtractionFailure) -> Self {
        ExtractionOutcome::Failed(failure)
    }
}
