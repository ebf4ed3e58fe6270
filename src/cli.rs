// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: point it at a markdown file and it checks every
// inline link in it. The flags only tune how the check runs and how the
// result is printed.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::config::ParserKind;

// #[derive(Parser)] generates the parsing code from the struct below
#[derive(Parser, Debug)]
#[command(
    name = "deadlinks",
    version,
    about = "Check every inline link in a markdown file and list the dead ones",
    long_about = "deadlinks reads one markdown document, resolves each [label](target) link \
                  against the document's directory and issues one GET per HTTP(S) link. \
                  Local and non-HTTP links are skipped. The run ends with a summary and \
                  the list of links that returned 404."
)]
pub struct Cli {
    /// Markdown file to check
    ///
    /// This is a positional argument (required, no flag needed)
    pub path: PathBuf,

    /// Output the final report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Number of links checked at the same time
    ///
    /// Progress is still reported in document order.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Extra attempts for a link whose request failed before any response
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Link extractor to use
    #[arg(long, value_enum, default_value_t = ParserKind::Regex)]
    pub parser: ParserKind,

    /// Exit with code 1 when at least one link returned 404
    #[arg(long)]
    pub fail_on_broken: bool,

    /// Print debug logs to stderr (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}
