// src/checker/mod.rs
// =============================================================================
// This module contains the link checking pipeline, leaf first.
//
// Submodules:
// - markdown: Extracts raw link targets from markdown text
// - resolve: Turns raw targets into absolute URLs
// - http: Verifies one absolute URL and classifies the outcome
//
// This file (mod.rs) re-exports the public API so callers can write
// `checker::resolve_links()` instead of `checker::resolve::resolve_links()`.
// =============================================================================

mod http;
mod markdown;
mod resolve;

pub use http::{CheckResult, HttpVerifier, ResultKind, Verify};
pub use markdown::{extractor_for, ExtractLinks};
pub use resolve::{base_url_for, resolve_links, ResolvedLink};

#[cfg(test)]
pub use http::NOT_HTTP_REASON;
#[cfg(test)]
pub use markdown::InlineLinkScanner;
