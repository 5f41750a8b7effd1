//! HTML index page linking every generated endpoint.

use std::fmt::Write as _;

use guidegen_shared::Classification;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::assembler::GeneratedGuide;

/// Inputs for [`render_index`].
#[derive(Debug, Clone, Copy)]
pub struct IndexPage<'a> {
    pub site_name: &'a str,
    pub version: &'a str,
    pub main_guide_path: &'a str,
    pub api_index_path: &'a str,
    pub badge_path: &'a str,
    pub guides: &'a [GeneratedGuide],
}

/// Render `index.html`, grouping guides by classification.
pub fn render_index(page: &IndexPage<'_>) -> String {
    let name = text(page.site_name);
    let version = text(page.version);
    let guide_links = render_guide_groups(page.guides);
    let example = page
        .guides
        .first()
        .map_or("api/guides/languages/python.json", |g| g.path.as_str());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{name} API</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; max-width: 800px; margin: 0 auto; padding: 20px; }}
        h1, h2, h3 {{ color: #333; }}
        a {{ color: #0366d6; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        code {{ background-color: #f6f8fa; padding: 3px 5px; border-radius: 3px; }}
        .version {{ color: #666; font-size: 0.9em; }}
    </style>
</head>
<body>
    <h1>{name} API</h1>
    <p>This is the JSON API for the {name}. <span class="version">Version {version}</span></p>

    <h2>Main Guide</h2>
    <ul>
        <li><a href="{main}">{main_label}</a> - Complete {name}</li>
        <li><a href="{api}">{api_label}</a> - Index of all endpoints</li>
        <li><a href="{badge}">{badge_label}</a> - Version badge</li>
    </ul>

    <h2>Specialized Guides</h2>
{guide_links}
    <h2>Usage with MCP</h2>
    <p>To use with Model Context Protocol:</p>
    <pre><code>GET {main}
GET {api}
GET {example}</code></pre>
</body>
</html>
"#,
        main = attr(page.main_guide_path),
        main_label = text(file_label(page.main_guide_path)),
        api = attr(page.api_index_path),
        api_label = text(file_label(page.api_index_path)),
        badge = attr(page.badge_path),
        badge_label = text(file_label(page.badge_path)),
        example = text(example),
    )
}

fn render_guide_groups(guides: &[GeneratedGuide]) -> String {
    let mut html = String::new();

    for kind in Classification::ALL {
        let group: Vec<&GeneratedGuide> = guides.iter().filter(|g| g.kind == kind).collect();
        if group.is_empty() {
            continue;
        }

        let _ = writeln!(html, "    <h3>{} Guides</h3>", kind.label());
        html.push_str("    <ul>\n");
        for guide in group {
            let _ = writeln!(
                html,
                "        <li><a href=\"{}\">{}</a></li>",
                attr(&guide.path),
                text(&guide.title)
            );
        }
        html.push_str("    </ul>\n");
    }

    if html.is_empty() {
        html.push_str("    <p>No specialized guides found.</p>\n");
    }
    html
}

/// Last path segment, used as link text.
fn file_label(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn guide(title: &str, kind: Classification, stem: &str) -> GeneratedGuide {
        GeneratedGuide {
            title: title.into(),
            kind,
            stem: stem.into(),
            path: format!("api/guides/{}/{stem}.json", kind.dir_name()),
        }
    }

    fn page<'a>(guides: &'a [GeneratedGuide]) -> IndexPage<'a> {
        IndexPage {
            site_name: "AI Developer Guide",
            version: "1.2.3",
            main_guide_path: "api/guide.json",
            api_index_path: "api.json",
            badge_path: "badge.json",
            guides,
        }
    }

    #[test]
    fn groups_guides_in_classification_order() {
        let guides = vec![
            guide("PostgreSQL", Classification::Platform, "postgresql"),
            guide("Python", Classification::Language, "python"),
            guide("Make", Classification::Pattern, "make"),
        ];
        let html = render_index(&page(&guides));

        let language = html.find("<h3>Language Guides</h3>").unwrap();
        let pattern = html.find("<h3>Pattern Guides</h3>").unwrap();
        let platform = html.find("<h3>Platform Guides</h3>").unwrap();
        assert!(language < pattern && pattern < platform);
        assert!(!html.contains("Other Guides"));
        assert!(html.contains(r#"<a href="api/guides/languages/python.json">Python</a>"#));
    }

    #[test]
    fn shows_version_and_main_links() {
        let html = render_index(&page(&[]));
        assert!(html.contains("Version 1.2.3"));
        assert!(html.contains(r#"<a href="api/guide.json">guide.json</a>"#));
        assert!(html.contains(r#"<a href="api.json">api.json</a>"#));
        assert!(html.contains("No specialized guides found."));
    }

    #[test]
    fn escapes_titles() {
        let guides = vec![guide("<script>&", Classification::Other, "x")];
        let html = render_index(&page(&guides));
        assert!(html.contains("&lt;script&gt;&amp;"));
        assert!(!html.contains("<script>&"));
    }

    #[test]
    fn escapes_quotes_in_link_targets() {
        let mut odd = guide("Odd", Classification::Other, "odd");
        odd.path = r#"api/guides/others/"odd".json"#.into();
        let html = render_index(&page(std::slice::from_ref(&odd)));
        assert!(html.contains(r#"href="api/guides/others/&quot;odd&quot;.json""#));
    }
}
