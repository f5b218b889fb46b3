//! Search-then-extract entity enrichment.
//!
//! Given a column of entity names and a template with one placeholder, each
//! entity is searched on the web, the first result's snippet is handed to a
//! language model together with the rendered template, and the model's answer
//! is collected into a two-column table.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chat_client::ChatClient;
//! use enrichment::{Enricher, SerpWebSearcher, Template, TableSource, SourceLoader};
//!
//! let mut loader = SourceLoader::new();
//! let table = loader.load(&TableSource::Csv("companies.csv".into())).await?;
//!
//! let enricher = Enricher::new(
//!     SerpWebSearcher::new(serp_api_key),
//!     ChatClient::groq(groq_api_key),
//! );
//! let template = Template::parse("Get me the email of {Company}")?;
//!
//! let report = enricher.run_table(&table, "Company", &template).await?;
//! report.results.save("extracted_information.csv")?;
//! ```
//!
//! # Modules
//!
//! - [`pipeline`] - Templates, prompts, extraction client and the run loop
//! - [`traits`] - Search and completion seams
//! - [`searchers`] - SerpAPI searcher
//! - [`sources`] - CSV / Google Sheets input and the source cache
//! - [`types`] - Config, outcomes, tables
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod searchers;
pub mod security;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{EnrichmentError, SearchError, SourceError, TemplateError};
pub use traits::{
    completer::Completer,
    searcher::{MockWebSearcher, OrganicResult, WebSearcher},
};
pub use types::{
    config::{ExtractionConfig, SearchConfig},
    outcome::{ExtractionFailure, ExtractionOutcome},
    results::{ResultTable, RunReport, SkipReason, SkippedEntity},
    table::Table,
};

// Re-export pipeline components
pub use pipeline::{
    build_query, classify_response, format_extraction_prompt, Enricher, EntityOutcome, Extractor,
    Template,
};

// Re-export searchers and sources
pub use searchers::SerpWebSearcher;
pub use sources::{
    ServiceAccountKey, SheetsClient, SourceCache, SourceId, SourceLoader, TableSource,
};

// Re-export testing utilities
pub use testing::{MockCompleter, MockReply};
