// src/logging.rs
// =============================================================================
// Diagnostics go through the `log` facade and are printed to stderr by
// env_logger, so they never mix with the report on stdout.
//
// Default level is warn; --verbose raises it to debug. RUST_LOG, when set,
// wins over both.
// =============================================================================

use log::{debug, LevelFilter};

use crate::config::AuditConfig;

/// Initialize the logger. Safe to call more than once; later calls are ignored.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let initialized = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .try_init();

    if initialized.is_ok() {
        debug!("Logger initialized with level: {level:?}");
    }
}

/// Log the effective run configuration
pub fn log_config(config: &AuditConfig) {
    debug!(
        "Input: {}, parser: {:?}, output: {:?}",
        config.input.display(),
        config.parser,
        config.output
    );
    debug!(
        "HTTP: concurrency={}, timeout={:?}, retries={}",
        config.concurrency, config.timeout, config.retries
    );
}
