// src/audit/summary.rs
// =============================================================================
// Aggregate counts for one run.
//
// Every link lands in exactly one counter, so after a complete run
//   ok + not_found + errors + skipped + other == total
// `errors` covers both network failures and checks that crashed.
// =============================================================================

use serde::Serialize;

use crate::checker::{CheckResult, ResultKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of links in the document
    pub total: usize,
    pub ok: usize,
    pub not_found: usize,
    pub errors: usize,
    pub skipped: usize,
    /// Any status other than 200 or 404
    pub other: usize,
    /// URLs that returned 404, in the order they were checked
    pub not_found_links: Vec<String>,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, result: &CheckResult) {
        match &result.kind {
            ResultKind::Ok => self.ok += 1,
            ResultKind::NotFound => {
                self.not_found += 1;
                self.not_found_links.push(result.url.clone());
            }
            ResultKind::OtherStatus(_) => self.other += 1,
            ResultKind::NetworkError(_) => self.errors += 1,
            ResultKind::Skipped(_) => self.skipped += 1,
        }
    }

    /// Counts a check that crashed before producing a result.
    ///
    /// The URL is not kept anywhere; only 404s are listed.
    pub fn record_fault(&mut self) {
        self.errors += 1;
    }

    /// Sum of all counters
    pub fn classified(&self) -> usize {
        self.ok + self.not_found + self.errors + self.skipped + self.other
    }

    pub fn has_broken_links(&self) -> bool {
        self.not_found > 0
    }
}
