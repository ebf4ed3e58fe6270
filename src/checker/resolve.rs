// src/checker/resolve.rs
// =============================================================================
// This module turns raw link targets into absolute URLs.
//
// Every document gets a base URL: the `file://` URL of the directory it lives
// in, with a trailing slash. Targets are then resolved against that base the
// same way a browser resolves an `href`:
//   base = "file:///docs/"
//   "./img/a.png"         -> "file:///docs/img/a.png"
//   "../README.md"        -> "file:///README.md"
//   "https://example.com" -> "https://example.com" (untouched)
//
// Resolution never fails. Input we can't make sense of comes back as-is and
// the verifier decides what to do with it.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use url::Url;

/// A raw link target paired with its absolute form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Target exactly as written in the document
    pub raw: String,
    /// Absolute URL that will be checked
    pub resolved: String,
}

// Builds the base URL for a document: its parent directory as a file:// URL
//
// The path is canonicalized first, so relative paths and symlinks work.
pub fn base_url_for(document: &Path) -> Result<Url> {
    let canonical = document
        .canonicalize()
        .with_context(|| format!("cannot locate {}", document.display()))?;

    let dir = canonical
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", canonical.display()))?;

    // from_directory_path adds the trailing slash that makes joins land
    // inside the directory instead of replacing its last segment
    Url::from_directory_path(dir)
        .map_err(|_| anyhow!("cannot build a file URL for {}", dir.display()))
}

// Resolves one raw target against the base
//
// Returns: the absolute URL as a String (never an error)
pub fn resolve_url(base: &Url, raw: &str) -> String {
    // Already absolute, keep the exact spelling from the document
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }

    // Something like "ht!tp://host" was meant to be absolute. Joining it
    // would bury it under the base directory as a bogus local path.
    if has_invalid_scheme(raw) {
        return raw.to_string();
    }

    match base.join(raw) {
        Ok(url) => url.to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Resolves a batch of raw targets, keeping their order.
pub fn resolve_links<I>(base: &Url, raw_links: I) -> Vec<ResolvedLink>
where
    I: IntoIterator<Item = String>,
{
    raw_links
        .into_iter()
        .map(|raw| {
            let resolved = resolve_url(base, &raw);
            ResolvedLink { raw, resolved }
        })
        .collect()
}

// True when the text before "://" is not a legal URL scheme
// (ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ))
fn has_invalid_scheme(raw: &str) -> bool {
    let Some((candidate, _)) = raw.split_once("://") else {
        return false;
    };

    // "./a://b" or "path/x://y" are relative paths, not schemes
    if candidate.is_empty() || candidate.contains(['/', '?', '#']) {
        return false;
    }

    let mut chars = candidate.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_is_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    !(starts_with_letter && rest_is_valid)
}
