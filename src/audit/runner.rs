// src/audit/runner.rs
// =============================================================================
// This module drives a full run: every resolved link is verified, counted and
// reported, in document order.
//
// How it works:
// 1. Each link becomes a future that spawns its check as a tokio task
// 2. `buffered(n)` keeps at most n of those futures running, but yields their
//    outputs in the original order
// 3. For each output we update the summary and notify the reporter
// 4. After the last link the finished report goes to the reporter
//
// Resilience:
// - A check that panics shows up as a JoinError from its task
// - That link is counted as an error and the run carries on
// =============================================================================

use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::io;
use std::sync::Arc;
use tokio::task::JoinError;

use super::summary::RunSummary;
use crate::checker::{CheckResult, ResolvedLink, Verify};
use crate::config::AuditConfig;
use crate::report::Reporter;

/// Everything a finished run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub summary: RunSummary,
    /// One entry per completed check, in document order
    pub results: Vec<CheckResult>,
}

/// Verifies a list of links and reports on them
pub struct LinkAudit {
    verifier: Arc<dyn Verify>,
    reporter: Box<dyn Reporter>,
    concurrency: usize,
}

impl LinkAudit {
    pub fn new(
        verifier: Arc<dyn Verify>,
        reporter: Box<dyn Reporter>,
        config: &AuditConfig,
    ) -> Self {
        Self {
            verifier,
            reporter,
            concurrency: config.concurrency.max(1),
        }
    }

    // Checks every link and returns the finished report
    //
    // This never fails: per-link problems end up in the summary.
    pub async fn run(&mut self, links: Vec<ResolvedLink>) -> RunReport {
        let total = links.len();
        info!("Starting to check {total} links (concurrency {})", self.concurrency);
        emit(self.reporter.start(total));

        let mut summary = RunSummary::new(total);
        let mut results = Vec::with_capacity(total);

        let verifier = Arc::clone(&self.verifier);
        let checks = links.into_iter().enumerate().map(move |(i, link)| {
            let verifier = Arc::clone(&verifier);
            async move {
                debug!("Checking {} (written as {})", link.resolved, link.raw);
                let url = link.resolved.clone();
                let outcome = tokio::spawn(async move { verifier.verify(&url).await }).await;
                (i + 1, link.resolved, outcome)
            }
        });

        let mut outcomes = stream::iter(checks).buffered(self.concurrency);

        while let Some((index, url, outcome)) = outcomes.next().await {
            match outcome {
                Ok(result) => {
                    debug!("{} -> {}", result.url, result.kind);
                    summary.record(&result);
                    emit(self.reporter.result(index, total, &result));
                    results.push(result);
                }
                Err(fault) => {
                    let message = describe_fault(fault);
                    error!("An error occurred while checking {url}: {message}");
                    summary.record_fault();
                    emit(self.reporter.fault(index, total, &url, &message));
                }
            }
        }

        debug_assert_eq!(summary.classified(), total);
        info!(
            "Checked {} links: {} ok, {} not found, {} errors, {} skipped, {} other",
            summary.total,
            summary.ok,
            summary.not_found,
            summary.errors,
            summary.skipped,
            summary.other
        );

        let report = RunReport { summary, results };
        emit(self.reporter.finish(&report));
        report
    }
}

// Output problems (closed stdout, full disk) must not stop the run
fn emit(outcome: io::Result<()>) {
    if let Err(e) = outcome {
        warn!("Failed to write report output: {e}");
    }
}

fn describe_fault(fault: JoinError) -> String {
    if !fault.is_panic() {
        return fault.to_string();
    }

    let payload = fault.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "check panicked".to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::spawn for every check?
//    - A spawned task is isolated: if it panics, the panic stops at the task
//    - Awaiting the JoinHandle gives Err(JoinError) instead of crashing us
//
// 2. buffered vs buffer_unordered
//    - buffer_unordered(n) yields results as they complete
//    - buffered(n) runs the same n futures but yields in input order
//    - We need input order so "Link 3/10" really is the third link
//
// 3. Why Arc<dyn Verify>?
//    - Every spawned task needs its own handle to the verifier
//    - Arc is a shared, reference-counted pointer; cloning it is cheap
// -----------------------------------------------------------------------------
