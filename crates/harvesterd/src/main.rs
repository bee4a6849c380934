//! Command line interface for the arXiv metadata harvester.
//!
//! A single run executes the whole pipeline and terminates: build the query
//! from the configured keywords and categories, drive the paginated fetch
//! loop, append the records to the JSONL log, and (if enabled) download the
//! matching PDFs.
//!
//! # Usage
//!
//! ```bash
//! # Run with the default config file (harvester.toml)
//! harvester
//!
//! # Run with an explicit config and verbose logging
//! harvester --config fetch_llm.toml -vv
//! ```
//!
//! Fatal errors (bad configuration, a failed page fetch) terminate the
//! process with a non-zero exit code. Per-record PDF failures are reported
//! as warnings and do not affect the exit code.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Parser};
use console::style;
use harvester::{
  client::ArxivClient,
  config::Config,
  download::PdfDownloader,
  fetch::{fetch_papers, FetchPlan},
  query::build_query,
  sink::JsonlSink,
};
use tracing_subscriber::EnvFilter;

mod error;

use crate::error::*;

/// Prefix for informational messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "⚠ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Harvest arXiv paper metadata and PDFs for a topical query")]
struct Cli {
  /// Path to the TOML configuration file
  #[arg(short, long, default_value = "harvester.toml")]
  config: PathBuf,

  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(short, long, action = ArgAction::Count, help = "Increase logging verbosity")]
  verbose: u8,
}

/// Configures the logging system based on the verbosity level.
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Entry point for the harvester CLI.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  if let Err(e) = run(&cli).await {
    eprintln!("{} {e}", style(ERROR_PREFIX).red());
    std::process::exit(1);
  }
}

/// Executes one harvesting run end to end.
async fn run(cli: &Cli) -> Result<()> {
  let config = Config::from_file(&cli.config)?;

  let query = build_query(&config.keywords, &config.arxiv_categories);
  println!("{} arXiv query: {}", style(INFO_PREFIX).cyan(), style(&query).yellow());

  let client = ArxivClient::new(&config.arxiv_api);
  let sink = JsonlSink::new(&config.out_jsonl);
  let plan = FetchPlan::new(query, config.batch_size, config.total_to_fetch);

  let records = fetch_papers(&client, &plan, &sink).await?;
  println!(
    "{} Saved {} records to {}",
    style(SUCCESS_PREFIX).green(),
    records.len(),
    style(config.out_jsonl.display()).yellow()
  );

  if config.download_pdfs {
    let downloader = PdfDownloader::new(&config.pdf_dir);
    let report = downloader.download_all(&records).await?;

    for path in &report.downloaded {
      println!("{} Downloaded: {}", style(INFO_PREFIX).cyan(), style(path.display()).yellow());
    }
    for (id, reason) in &report.failed {
      println!(
        "{} PDF download failed for {}: {}",
        style(WARNING_PREFIX).yellow(),
        style(id).cyan(),
        reason
      );
    }
    println!(
      "{} Downloaded {} PDFs to {} ({} already present, {} failed)",
      style(SUCCESS_PREFIX).green(),
      report.downloaded.len(),
      style(config.pdf_dir.display()).yellow(),
      report.skipped,
      report.failed.len()
    );
  }

  Ok(())
}
