//! Command implementations

pub mod columns;
pub mod run;

use colored::Colorize;
use console::{pad_str, Alignment};
use enrichment::{EntityOutcome, ExtractionOutcome, ResultTable, RunReport, SkipReason, Table};

const MAX_CELL_WIDTH: usize = 40;

/// Render rows as a padded text grid with a header rule.
pub fn format_grid(header: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            std::iter::once(&header[i])
                .chain(rows.iter().filter_map(|r| r.get(i)))
                .map(|cell| console::measure_text_width(cell))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let line = |cells: &[String]| {
        widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                pad_str(cell, width, Alignment::Left, Some("…")).into_owned()
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = line(header);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        out.push('\n');
        out.push_str(&line(row));
    }
    out
}

/// Print the column names and the first `rows` rows of a table.
pub fn print_preview(table: &Table, rows: usize) {
    println!("{}", "Data preview:".bright_cyan().bold());
    println!("{}", format_grid(table.columns(), table.preview(rows)));
    println!();
    println!(
        "{} {} ({} rows)",
        "Columns:".bold(),
        table.columns().join(", "),
        table.len()
    );
}

/// One progress line per processed entity.
pub fn print_progress(index: usize, total: usize, entity: &str, outcome: &EntityOutcome) {
    let counter = format!("[{}/{}]", index + 1, total).dimmed();
    match outcome {
        EntityOutcome::Extracted(ExtractionOutcome::Extracted(value)) => {
            println!("{} {} {} {}", counter, "✓".bright_green(), entity.bold(), value)
        }
        EntityOutcome::Extracted(ExtractionOutcome::Failed(failure)) => {
            println!("{} {} {} {}", counter, "!".bright_yellow(), entity.bold(), failure)
        }
        EntityOutcome::Skipped(reason) => println!(
            "{} {} {} {}",
            counter,
            "✗".bright_red(),
            entity.bold(),
            skip_reason(reason).dimmed()
        ),
    }
}

fn skip_reason(reason: &SkipReason) -> String {
    match reason {
        SkipReason::NoSnippet => "no search results, skipped".to_string(),
        SkipReason::SearchFailed(e) => format!("search failed, skipped ({})", e),
    }
}

fn result_rows(results: &ResultTable) -> Vec<Vec<String>> {
    results
        .iter()
        .map(|(entity, outcome)| vec![entity.to_string(), outcome.render()])
        .collect()
}

/// Print the extracted information table and a summary line.
pub fn print_report(report: &RunReport) {
    println!();
    println!("{}", "Extracted Information:".bright_cyan().bold());
    let header = [
        enrichment::types::results::ENTITY_COLUMN.to_string(),
        enrichment::types::results::EXTRACTED_COLUMN.to_string(),
    ];
    println!("{}", format_grid(&header, &result_rows(&report.results)));
    println!();
    println!(
        "{} extracted, {} failed, {} skipped",
        report.results.extracted_count().to_string().bright_green(),
        report.results.failed_count().to_string().bright_yellow(),
        report.skipped.len().to_string().bright_red(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_grid() {
        let grid = format_grid(
            &strings(&["Entity", "Extracted Information"]),
            &[strings(&["OpenAI", "info@openai.com"]), strings(&["Anthropic"])],
        );

        assert_eq!(
            grid,
            "Entity    | Extracted Information\n\
             ----------+----------------------\n\
             OpenAI    | info@openai.com\n\
             Anthropic |"
        );
    }

    #[test]
    fn test_format_grid_truncates_long_cells() {
        let long = "x".repeat(100);
        let grid = format_grid(&strings(&["Company"]), &[vec![long]]);
        let last = grid.lines().last().unwrap();

        assert_eq!(console::measure_text_width(last), MAX_CELL_WIDTH);
        assert!(last.ends_with('…'));
    }

    #[test]
    fn test_result_rows_render_failures() {
        let mut results = ResultTable::new();
        results.insert("OpenAI", ExtractionOutcome::Extracted("info@openai.com".into()));
        results.insert(
            "Acme",
            ExtractionOutcome::Failed(enrichment::ExtractionFailure::EmptyResponse),
        );

        assert_eq!(
            result_rows(&results),
            vec![
                strings(&["OpenAI", "info@openai.com"]),
                strings(&["Acme", "Groq API returned an empty response."]),
            ]
        );
    }
}
