use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chat_client::ChatClient;
use colored::Colorize;
use enrichment::{Enricher, RunReport, SerpWebSearcher, SourceLoader, Table, TableSource, Template};

use crate::cmd::{print_preview, print_progress, print_report};
use crate::config::Config;

/// Load the source, run every entity of `column` and save the result table.
pub async fn run(
    config: &Config,
    source: &TableSource,
    column: &str,
    prompt: &str,
    output: &Path,
) -> Result<()> {
    let template = Template::parse(prompt).context("Invalid prompt template")?;

    let mut loader = config.source_loader()?;
    let table = load_table(&mut loader, source).await?;
    print_preview(&table, 5);
    println!();

    let enricher = config.enricher()?;
    let report = enrich_column(&enricher, &table, column, &template).await?;

    print_report(&report);
    save_report(&report, output)
}

/// Load a table, reporting which source is read.
pub async fn load_table(loader: &mut SourceLoader, source: &TableSource) -> Result<Arc<Table>> {
    println!("{} {}", "Loading".bright_blue(), source);
    loader
        .load(source)
        .await
        .with_context(|| format!("Failed to load {}", source))
}

/// Run the extraction loop over one column, printing progress as it goes.
pub async fn enrich_column(
    enricher: &Enricher<SerpWebSearcher, ChatClient>,
    table: &Table,
    column: &str,
    template: &Template,
) -> Result<RunReport> {
    println!(
        "{} entities from column {}",
        "Processing".bright_blue().bold(),
        column.bold()
    );
    Ok(enricher
        .run_table_with_progress(table, column, template, print_progress)
        .await?)
}

pub fn save_report(report: &RunReport, output: &Path) -> Result<()> {
    report
        .results
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{} {}", "Saved results to".bright_green(), output.display());
    Ok(())
}
