// src/config.rs
// =============================================================================
// Run configuration.
//
// Everything a run needs (input path, output format, concurrency, HTTP
// settings) is collected here once and handed to the components explicitly.
// Nothing reads global state after startup.
// =============================================================================

use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

/// Which link extractor to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ParserKind {
    /// Textual scan for `[label](target)`
    #[default]
    Regex,
    /// Full CommonMark parse (inline links and images)
    Commonmark,
}

/// How the report is written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Markdown document to check
    pub input: PathBuf,
    /// Maximum number of checks in flight (at least 1)
    pub concurrency: usize,
    /// Per-request timeout; None waits forever
    pub timeout: Option<Duration>,
    /// Extra attempts after a transport failure
    pub retries: u32,
    pub parser: ParserKind,
    pub output: OutputFormat,
    /// Exit with code 1 when any link returned 404
    pub fail_on_broken: bool,
    pub verbose: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("README.md"),
            concurrency: 1,
            timeout: None,
            retries: 0,
            parser: ParserKind::default(),
            output: OutputFormat::default(),
            fail_on_broken: false,
            verbose: false,
        }
    }
}

impl From<Cli> for AuditConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.path,
            concurrency: usize::from(cli.concurrency.max(1)),
            timeout: cli.timeout.map(Duration::from_secs),
            retries: cli.retries,
            parser: cli.parser,
            output: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            fail_on_broken: cli.fail_on_broken,
            verbose: cli.verbose,
        }
    }
}
