// src/report.rs
// =============================================================================
// This module renders the progress stream and the end-of-run summary.
//
// The audit loop only talks to the Reporter trait:
// - start(total)              once, before the first check
// - result(index, total, r)   once per finished check, in document order
// - fault(index, total, ...)  when a check crashed instead of finishing
// - finish(report)            once, after the last link
//
// Two implementations:
// - ConsoleReporter: human-readable text with a progress bar
// - JsonReporter: silent during the run, pretty JSON at the end
// =============================================================================

use std::io::{self, Write};

use crate::audit::{RunReport, RunSummary};
use crate::checker::CheckResult;
use crate::config::OutputFormat;

const PROGRESS_WIDTH: usize = 50;

/// Receives structured events from a run.
pub trait Reporter {
    fn start(&mut self, _total: usize) -> io::Result<()> {
        Ok(())
    }

    /// `index` is 1-based.
    fn result(&mut self, index: usize, total: usize, result: &CheckResult) -> io::Result<()>;

    fn fault(
        &mut self,
        _index: usize,
        _total: usize,
        _url: &str,
        _message: &str,
    ) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, report: &RunReport) -> io::Result<()>;
}

/// Text reporter writing to any sink (stdout in the binary)
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out, "\nSummary:")?;
        writeln!(self.out, "Total links checked: {}", summary.total)?;
        writeln!(self.out, "OK (200): {}", summary.ok)?;
        writeln!(self.out, "Not Found (404): {}", summary.not_found)?;
        writeln!(self.out, "Errors: {}", summary.errors)?;
        writeln!(self.out, "Skipped: {}", summary.skipped)?;
        writeln!(self.out, "Other status codes: {}", summary.other)?;

        if !summary.not_found_links.is_empty() {
            writeln!(self.out, "\nLinks returning 404 (Not Found):")?;
            for (i, link) in summary.not_found_links.iter().enumerate() {
                writeln!(self.out, "{}. {}", i + 1, link)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn start(&mut self, total: usize) -> io::Result<()> {
        writeln!(self.out, "Starting to check {total} links...\n")
    }

    fn result(&mut self, index: usize, total: usize, result: &CheckResult) -> io::Result<()> {
        writeln!(self.out, "\nLink {index}/{total}: {}", result.url)?;
        writeln!(self.out, "Status: {}", result.kind)?;
        if let Some(message) = &result.message {
            writeln!(self.out, "Message: {message}")?;
        }
        writeln!(self.out, "{}", progress_bar(index, total, PROGRESS_WIDTH))
    }

    fn fault(&mut self, index: usize, total: usize, url: &str, message: &str) -> io::Result<()> {
        writeln!(self.out, "\nLink {index}/{total}: {url}")?;
        writeln!(self.out, "Status: error")?;
        writeln!(self.out, "Message: check failed unexpectedly: {message}")?;
        writeln!(self.out, "{}", progress_bar(index, total, PROGRESS_WIDTH))
    }

    fn finish(&mut self, report: &RunReport) -> io::Result<()> {
        self.write_summary(&report.summary)?;
        self.out.flush()
    }
}

/// Writes the whole report as pretty JSON once the run is over
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    // Per-link events would break the JSON document on stdout
    fn result(&mut self, _index: usize, _total: usize, _result: &CheckResult) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, report: &RunReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Reporter for the configured output format, writing to stdout
pub fn reporter_for(format: OutputFormat) -> Box<dyn Reporter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleReporter::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonReporter::new(io::stdout())),
    }
}

// Renders "[=====     ] 50%" for `current` out of `total`
pub fn progress_bar(current: usize, total: usize, width: usize) -> String {
    if total == 0 {
        return format!("[{}] 100%", "=".repeat(width));
    }

    let ratio = current.min(total) as f64 / total as f64;
    let percentage = (ratio * 100.0).round() as usize;
    let filled = (ratio * width as f64).round() as usize;

    format!(
        "[{}{}] {}%",
        "=".repeat(filled),
        " ".repeat(width - filled),
        percentage
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::NOT_HTTP_REASON;

    fn summary() -> RunSummary {
        RunSummary {
            total: 4,
            ok: 1,
            not_found: 1,
            errors: 1,
            skipped: 1,
            other: 0,
            not_found_links: vec!["http://example.test/missing".to_string()],
        }
    }

    fn output(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4, 4), "[    ] 0%");
        assert_eq!(progress_bar(1, 4, 4), "[=   ] 25%");
        assert_eq!(progress_bar(4, 4, 4), "[====] 100%");
        assert_eq!(progress_bar(1, 3, 10), "[===       ] 33%");
    }

    #[test]
    fn test_progress_bar_has_fixed_width() {
        for current in 0..=7 {
            let bar = progress_bar(current, 7, PROGRESS_WIDTH);
            let inner = &bar[1..bar.find(']').unwrap()];
            assert_eq!(inner.len(), PROGRESS_WIDTH);
        }
    }

    #[test]
    fn test_console_result_lines() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter
            .result(1, 2, &CheckResult::from_status("http://a.test", 200))
            .unwrap();
        reporter
            .result(2, 2, &CheckResult::skipped("file:///x.md", NOT_HTTP_REASON))
            .unwrap();

        let text = output(reporter);
        assert!(text.contains("Link 1/2: http://a.test\nStatus: 200\n["));
        assert!(text.contains(
            "Link 2/2: file:///x.md\nStatus: skipped\nMessage: Not an HTTP/HTTPS URL\n"
        ));
        assert!(text.ends_with("] 100%\n"));
    }

    #[test]
    fn test_console_fault_line() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.fault(3, 5, "http://a.test", "boom").unwrap();
        let text = output(reporter);
        assert!(text.contains("Link 3/5: http://a.test\nStatus: error\n"));
        assert!(text.contains("boom"));
    }

    #[test]
    fn test_console_summary_lists_not_found() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        let report = RunReport {
            summary: summary(),
            results: Vec::new(),
        };
        reporter.finish(&report).unwrap();

        let text = output(reporter);
        assert!(text.contains("Total links checked: 4\n"));
        assert!(text.contains(
            "OK (200): 1\nNot Found (404): 1\nErrors: 1\nSkipped: 1\nOther status codes: 0\n"
        ));
        assert!(
            text.ends_with("Links returning 404 (Not Found):\n1. http://example.test/missing\n")
        );
    }

    #[test]
    fn test_console_summary_without_not_found() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.start(0).unwrap();
        reporter
            .finish(&RunReport {
                summary: RunSummary::new(0),
                results: Vec::new(),
            })
            .unwrap();

        let text = output(reporter);
        assert!(text.starts_with("Starting to check 0 links...\n"));
        assert!(text.contains("Total links checked: 0\n"));
        assert!(!text.contains("Links returning 404"));
    }

    #[test]
    fn test_json_report() {
        let mut reporter = JsonReporter::new(Vec::new());
        let report = RunReport {
            summary: summary(),
            results: vec![
                CheckResult::from_status("http://example.test/missing", 404),
                CheckResult::network_error("ht!tp://broken", "invalid URL"),
            ],
        };
        reporter.result(1, 2, &report.results[0]).unwrap();
        reporter.finish(&report).unwrap();

        let json: serde_json::Value =
            serde_json::from_slice(&reporter.into_inner()).unwrap();
        assert_eq!(json["summary"]["not_found"], 1);
        assert_eq!(
            json["summary"]["not_found_links"][0],
            "http://example.test/missing"
        );
        assert_eq!(json["results"][0]["kind"]["kind"], "not_found");
        assert_eq!(json["results"][1]["kind"]["kind"], "network_error");
        assert_eq!(json["results"][1]["kind"]["detail"], "invalid URL");
        assert_eq!(json["results"][1]["message"], "invalid URL");
    }
}
