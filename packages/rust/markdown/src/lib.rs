//! Markdown extraction for the guide JSON API.
//!
//! Pulls structure out of raw Markdown without rendering it:
//! - [`extract_guide`] / [`extract_sections`]: the published part of the root document
//! - [`extract_references`]: links to satellite guides, classified by topic
//! - [`process_guide`]: one satellite guide file as title + content

mod cleanup;
mod references;
mod sections;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, warn};

use guidegen_shared::{GuideDocument, GuideGenError, Result};

pub use cleanup::strip_comments;
pub use references::{api_url, extract_references, is_guide_link};
pub use sections::{extract_guide, extract_sections};

// ---------------------------------------------------------------------------
// Guide documents
// ---------------------------------------------------------------------------

/// Read and parse one satellite guide, logging and returning `None` on failure.
///
/// Unreadable or non-UTF-8 files are skipped by the caller rather than
/// aborting the build.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn process_guide(path: &Path) -> Option<GuideDocument> {
    match read_guide(path) {
        Ok(guide) => Some(guide),
        Err(e) => {
            warn!(error = %e, "error processing guide, skipping");
            None
        }
    }
}

/// Read and parse one satellite guide.
pub fn read_guide(path: &Path) -> Result<GuideDocument> {
    let raw = std::fs::read_to_string(path).map_err(|e| GuideGenError::io(path, e))?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let guide = parse_guide(&raw, &stem);
    debug!(title = %guide.title, len = guide.content.len(), "parsed guide");
    Ok(guide)
}

/// Strip comments and derive the title from the first H1, falling back to `stem`.
pub fn parse_guide(raw: &str, stem: &str) -> GuideDocument {
    let content = strip_comments(raw);
    let title = extract_title(&content).unwrap_or_else(|| stem.to_string());
    GuideDocument { title, content }
}

/// Extract title from the first H1 in the Markdown text.
pub fn extract_title(md: &str) -> Option<String> {
    static H1_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").expect("valid regex"));

    H1_RE.captures(md).map(|c| c[1].trim().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
