//! Locating the published part of the root document and slicing it into
//! named subsections.

use std::ops::Range;

use tracing::debug;

use guidegen_shared::{GuideGenError, GuideSection, Result, SectionSpec};

use crate::cleanup::{heading_level, is_fence, strip_comments};

/// Return the document from `anchor` to the end, after stripping comments.
///
/// The anchor is matched as a literal substring. A document without it
/// cannot be published, so its absence is an error.
pub fn extract_guide(document: &str, anchor: &str) -> Result<String> {
    let content = strip_comments(document);

    let start = content
        .find(anchor)
        .ok_or_else(|| GuideGenError::anchor_not_found(anchor))?;

    Ok(content[start..].to_string())
}

/// Slice `content` into the sections named by `specs`, in `specs` order.
///
/// A section runs from its heading line to the next heading of the same or
/// higher level, or to the end of `content`. A missing heading yields an
/// empty section.
pub fn extract_sections(content: &str, specs: &[SectionSpec]) -> Vec<GuideSection> {
    resolve_boundaries(content, specs)
        .into_iter()
        .map(|(spec, range)| {
            let body = match range {
                Some(range) => content[range].to_string(),
                None => {
                    debug!(section = %spec.name, heading = %spec.heading, "section heading not found");
                    String::new()
                }
            };
            GuideSection {
                name: spec.name.clone(),
                title: heading_text(&spec.heading).to_string(),
                content: body,
            }
        })
        .collect()
}

/// A heading line found outside fenced code.
#[derive(Debug)]
struct Heading<'a> {
    start: usize,
    level: usize,
    line: &'a str,
}

/// Pair each spec with its `start..end` byte range, resolved in one scan.
fn resolve_boundaries<'s>(
    content: &str,
    specs: &'s [SectionSpec],
) -> Vec<(&'s SectionSpec, Option<Range<usize>>)> {
    let headings = scan_headings(content);

    specs
        .iter()
        .map(|spec| {
            let marker = spec.heading.trim_end();
            let range = headings
                .iter()
                .position(|h| h.line == marker)
                .map(|idx| {
                    let open = &headings[idx];
                    let end = headings[idx + 1..]
                        .iter()
                        .find(|h| h.level <= open.level)
                        .map_or(content.len(), |h| h.start);
                    open.start..end
                });
            (spec, range)
        })
        .collect()
}

fn scan_headings(content: &str) -> Vec<Heading<'_>> {
    let mut headings = Vec::new();
    let mut offset = 0;
    let mut in_fence = false;

    for raw in content.split_inclusive('\n') {
        let start = offset;
        offset += raw.len();

        if is_fence(raw) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(level) = heading_level(raw) {
            headings.push(Heading {
                start,
                level,
                line: raw.trim_end(),
            });
        }
    }

    headings
}

/// `## The Golden Rules` -> `The Golden Rules`.
fn heading_text(heading: &str) -> &str {
    heading.trim_start_matches('#').trim()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: &str = "## The Golden Rules";

    #[test]
    fn extract_guide_starts_at_anchor() {
        let doc = "# AI Developer Guide\n\nPreamble.\n\n## The Golden Rules\n\n1. Plan.\n\n## More\nTail.";
        let guide = extract_guide(doc, ANCHOR).unwrap();
        assert_eq!(guide, "## The Golden Rules\n\n1. Plan.\n\n## More\nTail.");
    }

    #[test]
    fn extract_guide_strips_comments_first() {
        let doc = "<!--intro-->\n## The Golden Rules\nRule <!-- hidden --> text.\n";
        let guide = extract_guide(doc, ANCHOR).unwrap();
        assert_eq!(guide, "## The Golden Rules\nRule  text.\n");
    }

    #[test]
    fn anchor_inside_comment_does_not_count() {
        let doc = "<!--\n## The Golden Rules\n-->\nNo rules here.";
        let err = extract_guide(doc, ANCHOR).unwrap_err();
        assert!(matches!(err, GuideGenError::AnchorNotFound { .. }));
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let err = extract_guide("# Title\n\n## the golden rules\n", ANCHOR).unwrap_err();
        assert!(err.to_string().contains(ANCHOR));
    }

    fn specs() -> Vec<SectionSpec> {
        vec![
            SectionSpec::new("golden_rules", "## The Golden Rules"),
            SectionSpec::new("plan", "### Plan"),
            SectionSpec::new("guides", "## Specialised Guides"),
        ]
    }

    #[test]
    fn sections_end_at_same_or_higher_heading() {
        let content = "## The Golden Rules\nRules.\n### Plan\nPlan it.\n#### Detail\nMore.\n### Build\nBuild it.\n## Specialised Guides\n- [Python](guides/python.md)\n";
        let sections = extract_sections(content, &specs());

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].name, "golden_rules");
        assert_eq!(sections[0].title, "The Golden Rules");
        assert_eq!(
            sections[0].content,
            "## The Golden Rules\nRules.\n### Plan\nPlan it.\n#### Detail\nMore.\n### Build\nBuild it.\n"
        );
        assert_eq!(sections[1].content, "### Plan\nPlan it.\n#### Detail\nMore.\n");
        assert_eq!(
            sections[2].content,
            "## Specialised Guides\n- [Python](guides/python.md)\n"
        );
    }

    #[test]
    fn missing_section_is_empty() {
        let content = "## The Golden Rules\nRules.\n";
        let sections = extract_sections(content, &specs());

        assert_eq!(sections[1].name, "plan");
        assert_eq!(sections[1].title, "Plan");
        assert!(sections[1].content.is_empty());
        assert!(sections[2].content.is_empty());
    }

    #[test]
    fn headings_inside_code_fences_are_ignored() {
        let content = "## The Golden Rules\n```md\n## Specialised Guides\n```\nStill rules.\n";
        let sections = extract_sections(content, &specs());

        assert_eq!(sections[0].content, content);
        assert!(sections[2].content.is_empty());
    }

    #[test]
    fn heading_must_match_whole_line() {
        let content = "## The Golden Rules Revisited\nNope.\n";
        let sections = extract_sections(content, &specs());
        assert!(sections[0].content.is_empty());
    }

    #[test]
    fn output_follows_spec_order() {
        let content = "## Specialised Guides\nG.\n## The Golden Rules\nR.\n";
        let names: Vec<String> = extract_sections(content, &specs())
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["golden_rules", "plan", "guides"]);
    }
}
