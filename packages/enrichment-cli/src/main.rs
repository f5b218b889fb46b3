//! `enrichment` - search the web for each entity in a table column and
//! extract information from the top result with an LLM.

mod cmd;
mod config;
mod interactive;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use enrichment::types::results::DEFAULT_OUTPUT_FILE;
use enrichment::TableSource;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "enrichment")]
#[command(about = "Extract information about entities from web search results")]
struct Cli {
    /// Runs the interactive session when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract information for every entity in a column
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Column holding the entity names
        #[arg(long)]
        column: String,

        /// Prompt template with exactly one {placeholder}
        #[arg(long)]
        prompt: String,

        /// Where to write the result CSV
        #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,
    },

    /// Preview a table and list its columns
    Columns {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of rows to show
        #[arg(long, default_value_t = 5)]
        rows: usize,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Local CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Google Sheets URL
    #[arg(long, value_name = "URL")]
    sheet: Option<String>,
}

impl SourceArgs {
    fn source(self) -> Result<TableSource> {
        match (self.csv, self.sheet) {
            (Some(path), None) => Ok(TableSource::Csv(path)),
            (None, Some(url)) => Ok(TableSource::Sheet(url)),
            _ => anyhow::bail!("exactly one of --csv or --sheet is required"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,enrichment=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            source,
            column,
            prompt,
            output,
        }) => {
            let config = Config::from_env().context("Failed to load configuration")?;
            cmd::run::run(&config, &source.source()?, &column, &prompt, &output).await
        }
        Some(Commands::Columns { source, rows }) => {
            cmd::columns::columns(&source.source()?, rows).await
        }
        None => {
            let config = Config::from_env().context("Failed to load configuration")?;
            interactive::run(&config).await
        }
    }
}
