//! Guide reference extraction from Markdown links.

use std::sync::LazyLock;

use regex::Regex;

use guidegen_shared::{Classification, GuideReference};

/// Substring a link target must contain to count as a guide reference.
const GUIDES_MARKER: &str = "guides";

/// Markdown extension a guide reference must end with.
const MARKDOWN_EXT: &str = ".md";

/// Extract references to satellite guides, in source order.
///
/// Only `[label](target)` links whose target contains `guides` and ends with
/// `.md` are kept; every other link is ignored. When `api_base` is given,
/// each reference also carries its `apiUrl`.
pub fn extract_references(text: &str, api_base: Option<&str>) -> Vec<GuideReference> {
    static LINK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\[([^\]()\n]*)\]\(([^\]()\n]*)\)").expect("valid regex"));

    LINK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let name = &caps[1];
            let path = &caps[2];

            if !is_guide_link(path) {
                return None;
            }

            let kind = Classification::from_path(path);
            Some(GuideReference {
                name: name.to_string(),
                path: path.to_string(),
                kind,
                api_url: api_base.map(|base| api_url(base, kind, path)),
            })
        })
        .collect()
}

/// Whether a link target points at a guide document.
pub fn is_guide_link(target: &str) -> bool {
    target.contains(GUIDES_MARKER) && target.ends_with(MARKDOWN_EXT)
}

/// `{base}/{type}s/{stem}.json` for a guide path.
pub fn api_url(base: &str, kind: Classification, path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let stem = file_name.strip_suffix(MARKDOWN_EXT).unwrap_or(file_name);
    format!("{base}/{}/{stem}.json", kind.dir_name())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
