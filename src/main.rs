// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments and build the run configuration
// 2. Read the markdown file (the only failure that aborts a run)
// 3. Extract, resolve and verify every inline link
// 4. Exit with proper code (0 = run completed, 1 = 404s with
//    --fail-on-broken, 2 = the document could not be processed)
// =============================================================================

mod audit;
mod checker;
mod cli;
mod config;
mod logging;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::sync::Arc;

use audit::LinkAudit;
use checker::HttpVerifier;
use cli::Cli;
use config::AuditConfig;

#[tokio::main]
async fn main() {
    let config = AuditConfig::from(Cli::parse());
    logging::init_logger(config.verbose);

    let exit_code = match run(&config).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

// Runs one audit of the configured document
// Returns:
//   Ok(0) = all links were processed
//   Ok(1) = --fail-on-broken and at least one 404
//   Err   = the document could not be read or the client could not be built
async fn run(config: &AuditConfig) -> Result<i32> {
    logging::log_config(config);

    let markdown = std::fs::read_to_string(&config.input)
        .with_context(|| format!("Error reading file {}", config.input.display()))?;
    let base = checker::base_url_for(&config.input)?;
    info!("Resolving links against {base}");

    let raw_links = checker::extractor_for(config.parser).extract_links(&markdown);
    let links = checker::resolve_links(&base, raw_links);

    let verifier = Arc::new(HttpVerifier::new(config)?);
    let reporter = report::reporter_for(config.output);

    let report = LinkAudit::new(verifier, reporter, config).run(links).await;

    if config.fail_on_broken && report.summary.has_broken_links() {
        Ok(1)
    } else {
        Ok(0)
    }
}
