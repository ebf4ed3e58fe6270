// src/audit/mod.rs
// =============================================================================
// This module runs the checks for a whole document.
//
// - runner: LinkAudit, the loop that verifies, counts and reports each link
// - summary: RunSummary, the per-outcome counters and the 404 list
// =============================================================================

mod runner;
mod summary;

pub use runner::{LinkAudit, RunReport};
pub use summary::RunSummary;
