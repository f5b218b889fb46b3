//! Interactive session: pick a source, a column and a prompt, then run.
//!
//! The loaded table stays cached while the same source is reused.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use enrichment::types::results::DEFAULT_OUTPUT_FILE;
use enrichment::{Table, TableSource, Template};

use crate::cmd::print_preview;
use crate::cmd::run::{enrich_column, load_table, save_report};
use crate::config::Config;

enum Next {
    SameTable,
    NewSource,
    Exit,
}

pub async fn run(config: &Config) -> Result<()> {
    let term = Term::stdout();
    let theme = ColorfulTheme::default();

    print_banner(&term)?;

    let mut loader = config.source_loader()?;
    let enricher = config.enricher()?;

    'sources: loop {
        let Some(source) = choose_source(&theme, &term)? else {
            break;
        };

        let table = match load_table(&mut loader, &source).await {
            Ok(table) => table,
            Err(e) => {
                println!("{} {:#}", "✗".bright_red(), e);
                continue;
            }
        };

        loop {
            println!();
            print_preview(&table, 5);
            println!();

            let column = choose_column(&theme, &term, &table)?;
            let template = prompt_template(&theme, &term, &column)?;

            match enrich_column(&enricher, &table, &column, &template).await {
                Ok(report) => {
                    crate::cmd::print_report(&report);
                    let save = Confirm::with_theme(&theme)
                        .with_prompt(format!("Save results to {}?", DEFAULT_OUTPUT_FILE))
                        .default(true)
                        .interact_on(&term)?;
                    if save {
                        if let Err(e) = save_report(&report, &PathBuf::from(DEFAULT_OUTPUT_FILE)) {
                            println!("{} {:#}", "✗".bright_red(), e);
                        }
                    }
                }
                Err(e) => println!("{} {:#}", "✗".bright_red(), e),
            }

            match choose_next(&theme, &term)? {
                Next::SameTable => continue,
                Next::NewSource => continue 'sources,
                Next::Exit => break 'sources,
            }
        }
    }

    println!("{}", "👋 Goodbye!".bright_blue());
    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!("{}", "╔════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║   Entity Information Extractor         ║".bright_cyan());
    println!("{}", "╚════════════════════════════════════════╝".bright_cyan());
    println!();
    Ok(())
}

fn choose_source(theme: &ColorfulTheme, term: &Term) -> Result<Option<TableSource>> {
    let options = ["📄 CSV file", "📊 Google Sheet URL", "🛑 Exit"];
    let selection = Select::with_theme(theme)
        .with_prompt("Where are the entities?")
        .items(&options)
        .default(0)
        .interact_on(term)?;

    let source = match selection {
        0 => {
            let path: String = Input::with_theme(theme)
                .with_prompt("CSV file path")
                .interact_text_on(term)?;
            TableSource::Csv(PathBuf::from(path.trim()))
        }
        1 => {
            let url: String = Input::with_theme(theme)
                .with_prompt("Google Sheet URL")
                .interact_text_on(term)?;
            TableSource::Sheet(url.trim().to_string())
        }
        _ => return Ok(None),
    };
    Ok(Some(source))
}

fn choose_column(theme: &ColorfulTheme, term: &Term, table: &Arc<Table>) -> Result<String> {
    let selection = Select::with_theme(theme)
        .with_prompt("Column with the entities")
        .items(table.columns())
        .default(0)
        .interact_on(term)?;
    Ok(table.columns()[selection].clone())
}

fn prompt_template(theme: &ColorfulTheme, term: &Term, column: &str) -> Result<Template> {
    let text: String = Input::with_theme(theme)
        .with_prompt("Prompt (use one {placeholder} for the entity)")
        .default(format!("Get me the email of {{{}}}", column))
        .validate_with(|input: &String| -> Result<(), String> {
            Template::parse(input.as_str())
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text_on(term)?;
    Ok(Template::parse(text)?)
}

fn choose_next(theme: &ColorfulTheme, term: &Term) -> Result<Next> {
    let options = [
        "🔁 Run another prompt on this table",
        "📂 Load a different source",
        "🛑 Exit",
    ];
    let selection = Select::with_theme(theme)
        .with_prompt("What next?")
        .items(&options)
        .default(0)
        .interact_on(term)?;

    Ok(match selection {
        0 => Next::SameTable,
        1 => Next::NewSource,
        _ => Next::Exit,
    })
}
