//! Enrichment pipeline.
//!
//! - Template validation and query building
//! - Prompt building
//! - Extraction client
//! - The per-entity search → extract loop

pub mod enrich;
pub mod extract;
pub mod prompts;
pub mod template;

pub use enrich::{Enricher, EntityOutcome};
pub use extract::{classify_response, Extractor};
pub use prompts::{format_extraction_prompt, PROMPT_PREFIX, PROMPT_SNIPPET_INTRO, PROMPT_SUFFIX};
pub use template::{build_query, Template};
