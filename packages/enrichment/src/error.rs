//! Typed errors for the enrichment library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Only input-stage failures surface as errors. Once a run has started,
//! search failures skip the entity and extraction failures become a
//! [`ExtractionFailure`](crate::types::outcome::ExtractionFailure) row.

use thiserror::Error;

/// Errors that stop a run before it starts.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Template is malformed
    #[error("invalid template: {0}")]
    Template(#[from] TemplateError),

    /// Input table could not be loaded
    #[error("input source error: {0}")]
    Source(#[from] SourceError),

    /// Selected column does not exist in the table
    #[error("column not found: {column} (available: {})", available.join(", "))]
    InvalidColumn {
        column: String,
        available: Vec<String>,
    },

    /// Selected column yielded no entities
    #[error("column {column} has no values")]
    NoEntities { column: String },
}

/// Template validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Template has no `{placeholder}` token
    #[error("template has no {{placeholder}}: {template:?}")]
    MissingPlaceholder { template: String },

    /// Template has more than one `{placeholder}` token
    #[error("template has {count} placeholders, expected exactly one: {template:?}")]
    MultiplePlaceholders { template: String, count: usize },
}

/// Errors from the web search client.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport failure (connect, timeout, TLS), with the request URL removed
    #[error("request error: {0}")]
    Http(reqwest::Error),

    /// Search API answered with a non-2xx status
    #[error("search API returned status {status}")]
    Status { status: u16 },

    /// Response body was not the expected JSON
    #[error("unexpected search response: {0}")]
    Parse(String),
}

/// Errors loading an input table.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Local file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV could not be parsed
    #[error("CSV reading error: {0}")]
    Csv(#[from] csv::Error),

    /// Table has no header row
    #[error("table is empty")]
    EmptyTable,

    /// Sheet URL does not contain a spreadsheet id
    #[error("not a Google Sheets URL: {url}")]
    SheetUrl { url: String },

    /// Service-account credentials missing or unusable
    #[error("credentials error: {0}")]
    Credentials(String),

    /// Signing the OAuth assertion failed
    #[error("token signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Transport failure talking to Google
    #[error("Google Sheets request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Spreadsheet does not exist or is not shared with the service account
    #[error("spreadsheet not found: {spreadsheet_id}")]
    SpreadsheetNotFound { spreadsheet_id: String },

    /// Google API answered with a non-2xx status
    #[error("Google Sheets API error ({status}): {message}")]
    SheetsApi { status: u16, message: String },
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichmentError>;

/// Result type alias for source loading.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
