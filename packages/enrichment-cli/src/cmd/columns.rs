use anyhow::Result;
use enrichment::TableSource;

use crate::cmd::print_preview;
use crate::cmd::run::load_table;
use crate::config::source_loader_from_env;

/// Show the first rows and column names of a source.
pub async fn columns(source: &TableSource, rows: usize) -> Result<()> {
    let mut loader = source_loader_from_env()?;
    let table = load_table(&mut loader, source).await?;
    print_preview(&table, rows);
    Ok(())
}
