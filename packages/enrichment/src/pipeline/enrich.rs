//! The enrichment loop.
//!
//! For each distinct entity, strictly one at a time:
//!
//! ```text
//! pending ──search──▶ searched ──extract──▶ extracted   (row written)
//!    │
//!    └──no snippet / search error──▶ skipped            (no row)
//! ```
//!
//! Extraction failures still produce a row; search failures never do.

use tracing::{debug, info, warn};

use crate::error::{EnrichmentError, Result};
use crate::pipeline::extract::Extractor;
use crate::pipeline::template::{build_query, Template};
use crate::traits::completer::Completer;
use crate::traits::searcher::WebSearcher;
use crate::types::config::ExtractionConfig;
use crate::types::outcome::ExtractionOutcome;
use crate::types::results::{RunReport, SkipReason, SkippedEntity};
use crate::types::table::Table;

/// Terminal state of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityOutcome {
    /// Search found a snippet and extraction ran.
    Extracted(ExtractionOutcome),

    /// No row is produced.
    Skipped(SkipReason),
}

/// Drives search then extraction for every entity.
///
/// # Example
///
/// ```rust,ignore
/// let enricher = Enricher::new(SerpWebSearcher::new(serp_key), ChatClient::groq(groq_key));
/// let template = Template::parse("Get me the email of {Company}")?;
/// let report = enricher.run_table(&table, "Company", &template).await?;
/// report.results.save("extracted_information.csv")?;
/// ```
pub struct Enricher<S, C> {
    searcher: S,
    extractor: Extractor<C>,
}

impl<S: WebSearcher, C: Completer> Enricher<S, C> {
    /// Create an enricher with default extraction settings.
    pub fn new(searcher: S, completer: C) -> Self {
        Self {
            searcher,
            extractor: Extractor::new(completer),
        }
    }

    pub fn with_config(searcher: S, completer: C, config: ExtractionConfig) -> Self {
        Self {
            searcher,
            extractor: Extractor::with_config(completer, config),
        }
    }

    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    pub fn extractor(&self) -> &Extractor<C> {
        &self.extractor
    }

    /// Search then extract for a single entity.
    pub async fn process_entity(&self, entity: &str, template: &Template) -> EntityOutcome {
        let query = build_query(template, entity);
        debug!(entity, query = %query, state = "pending", "Searching");

        let snippet = match self.searcher.first_snippet(&query).await {
            Ok(Some(snippet)) => snippet,
            Ok(None) => {
                debug!(entity, state = "no_snippet", "Skipping entity");
                return EntityOutcome::Skipped(SkipReason::NoSnippet);
            }
            Err(e) => {
                warn!(entity, query = %query, error = %e, "Search failed, skipping entity");
                return EntityOutcome::Skipped(SkipReason::SearchFailed(e.to_string()));
            }
        };

        debug!(entity, state = "searched", "Extracting");
        let outcome = self.extractor.extract(entity, &snippet, template).await;
        debug!(entity, state = "extracted", ok = outcome.is_extracted(), "Extraction done");

        EntityOutcome::Extracted(outcome)
    }

    /// Process `entities` in order. Duplicates are collapsed to their first
    /// appearance.
    pub async fn run<I, E>(&self, entities: I, template: &Template) -> RunReport
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        self.run_with_progress(entities, template, |_, _, _, _| {}).await
    }

    /// Like [`Enricher::run`], calling `on_entity(index, total, entity, outcome)`
    /// after each entity.
    pub async fn run_with_progress<I, E, F>(
        &self,
        entities: I,
        template: &Template,
        mut on_entity: F,
    ) -> RunReport
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
        F: FnMut(usize, usize, &str, &EntityOutcome),
    {
        let unique: indexmap::IndexSet<String> = entities
            .into_iter()
            .map(|e| e.as_ref().to_string())
            .collect();
        let total = unique.len();

        info!(entities = total, template = %template, "Running extraction process");

        let mut report = RunReport::default();
        for (index, entity) in unique.into_iter().enumerate() {
            let outcome = self.process_entity(&entity, template).await;
            on_entity(index, total, &entity, &outcome);

            match outcome {
                EntityOutcome::Extracted(result) => {
                    report.results.insert(entity, result);
                }
                EntityOutcome::Skipped(reason) => {
                    report.skipped.push(SkippedEntity { entity, reason });
                }
            }
        }

        info!(
            extracted = report.results.extracted_count(),
            failed = report.results.failed_count(),
            skipped = report.skipped.len(),
            "Extraction process finished"
        );

        report
    }

    /// Run over the distinct, non-missing values of `column`.
    ///
    /// Fails before any network call if the column is unknown or empty.
    pub async fn run_table(
        &self,
        table: &Table,
        column: &str,
        template: &Template,
    ) -> Result<RunReport> {
        self.run_table_with_progress(table, column, template, |_, _, _, _| {})
            .await
    }

    /// Like [`Enricher::run_table`], reporting each entity to `on_entity`.
    pub async fn run_table_with_progress<F>(
        &self,
        table: &Table,
        column: &str,
        template: &Template,
        on_entity: F,
    ) -> Result<RunReport>
    where
        F: FnMut(usize, usize, &str, &EntityOutcome),
    {
        let entities = table.entities(column)?;
        if entities.is_empty() {
            return Err(EnrichmentError::NoEntities {
                column: column.to_string(),
            });
        }
        Ok(self.run_with_progress(entities, template, on_entity).await)
    }
}
