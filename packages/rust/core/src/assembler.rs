//! Output tree assembler.
//!
//! Reads the root document and the satellite guides, then writes the JSON
//! API and HTML index to the output directory.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, instrument, warn};

use guidegen_markdown::{extract_guide, extract_references, extract_sections, process_guide};
use guidegen_shared::{
    ApiEndpoints, ApiIndex, BuildConfig, Classification, EndpointDescriptor, GuideEndpoint,
    GuideGenError, GuideManifest, Metadata, Result, VersionBadge,
};

use crate::index::{IndexPage, render_index};
use crate::version::resolve_version;

/// Main guide path, relative to the output root.
pub const MAIN_GUIDE_PATH: &str = "api/guide.json";
/// API index path, relative to the output root.
pub const API_INDEX_PATH: &str = "api.json";
/// Version badge path, relative to the output root.
pub const BADGE_PATH: &str = "badge.json";
/// HTML index path, relative to the output root.
pub const INDEX_HTML_PATH: &str = "index.html";

/// Directory holding per-type guide endpoints, relative to the output root.
const GUIDES_OUTPUT_DIR: &str = "api/guides";

/// One satellite guide written during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGuide {
    /// Title taken from the guide's first H1 (or its file stem).
    pub title: String,
    pub kind: Classification,
    /// File stem, used as the endpoint key in `api.json`.
    pub stem: String,
    /// Endpoint path relative to the output root (`api/guides/languages/python.json`).
    pub path: String,
}

/// Output from a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub version: String,
    /// Number of guide references found in the root document.
    pub reference_count: usize,
    pub guides: Vec<GeneratedGuide>,
    /// Every file written, relative to `output_dir`, sorted.
    pub files: Vec<PathBuf>,
}

/// Run a full build stamped with today's date.
pub fn build(config: &BuildConfig) -> Result<BuildReport> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    build_dated(config, &today)
}

/// Run a full build with an explicit `lastUpdated` date.
///
/// Creates the following layout:
/// ```text
/// <output_dir>/
/// ├── index.html
/// ├── api.json
/// ├── badge.json
/// └── api/
///     ├── guide.json
///     └── guides/
///         ├── languages/<stem>.json
///         ├── patterns/<stem>.json
///         ├── platforms/<stem>.json
///         └── others/<stem>.json
/// ```
///
/// Nothing is written unless the source document is readable and contains
/// the anchor heading.
#[instrument(skip_all, fields(source = %config.source_path.display(), output = %config.output_dir.display()))]
pub fn build_dated(config: &BuildConfig, last_updated: &str) -> Result<BuildReport> {
    let document = std::fs::read_to_string(&config.source_path)
        .map_err(|e| GuideGenError::io(&config.source_path, e))?;

    let guide_content = extract_guide(&document, &config.anchor)?;
    let references = extract_references(&guide_content, Some(&config.api_base));
    let sections = extract_sections(&guide_content, &config.sections);
    debug!(
        references = references.len(),
        content_len = guide_content.len(),
        "extracted main guide"
    );

    let version = resolve_version(&config.version_file, &config.default_version);

    info!(guides_dir = %config.guides_dir.display(), "looking for guides");
    let guide_files = list_guide_files(&config.guides_dir);

    let mut out = OutputWriter::new(&config.output_dir);
    out.create_dirs()?;

    let mut guides = Vec::with_capacity(guide_files.len());
    for file in &guide_files {
        let Some(doc) = process_guide(file) else {
            continue;
        };

        let file_name = file_name(file);
        let stem = file_stem(file);
        let kind = Classification::from_path(&file_name);
        let path = format!("{GUIDES_OUTPUT_DIR}/{}/{stem}.json", kind.dir_name());

        let endpoint = GuideEndpoint {
            metadata: Metadata {
                name: doc.title.clone(),
                kind: Some(kind),
                version: version.clone(),
                last_updated: last_updated.to_string(),
                source: format!("{}/docs/guides/{file_name}", config.source_url),
            },
            content: doc.content,
        };
        out.write_json(&path, &endpoint)?;

        guides.push(GeneratedGuide {
            title: doc.title,
            kind,
            stem,
            path,
        });
    }

    let manifest = GuideManifest {
        metadata: Metadata {
            name: config.site_name.clone(),
            kind: None,
            version: version.clone(),
            last_updated: last_updated.to_string(),
            source: config.source_url.clone(),
        },
        content: guide_content,
        sections,
        references,
    };
    out.write_json(MAIN_GUIDE_PATH, &manifest)?;

    let api_index = build_api_index(config, &version, last_updated, &guides);
    out.write_json(API_INDEX_PATH, &api_index)?;
    out.write_json(BADGE_PATH, &VersionBadge::new(version.clone()))?;

    let html = render_index(&IndexPage {
        site_name: &config.site_name,
        version: &version,
        main_guide_path: MAIN_GUIDE_PATH,
        api_index_path: API_INDEX_PATH,
        badge_path: BADGE_PATH,
        guides: &guides,
    });
    out.write_text(INDEX_HTML_PATH, &html)?;

    let mut files = out.into_files();
    files.sort();

    info!(
        guides = guides.len(),
        references = manifest.references.len(),
        files = files.len(),
        "build complete"
    );

    Ok(BuildReport {
        output_dir: config.output_dir.clone(),
        version,
        reference_count: manifest.references.len(),
        guides,
        files,
    })
}

/// Markdown files directly inside `dir`, sorted by name.
///
/// A missing or unreadable directory yields no guides.
pub fn list_guide_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "guides directory unavailable, no guides generated");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    files
}

/// Summarize every endpoint for `api.json`.
fn build_api_index(
    config: &BuildConfig,
    version: &str,
    last_updated: &str,
    guides: &[GeneratedGuide],
) -> ApiIndex {
    let mut endpoints = ApiEndpoints {
        main_guide: EndpointDescriptor {
            path: MAIN_GUIDE_PATH.into(),
            description: format!("Complete {}", config.site_name),
        },
        ..Default::default()
    };

    for guide in guides {
        endpoints.guides_mut(guide.kind).insert(
            guide.stem.clone(),
            EndpointDescriptor {
                path: guide.path.clone(),
                description: guide.title.clone(),
            },
        );
    }

    ApiIndex {
        name: config.site_name.clone(),
        description: config.site_description.clone(),
        version: version.to_string(),
        source: config.source_url.clone(),
        last_updated: last_updated.to_string(),
        endpoints,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Writes files under the output root and remembers what it wrote.
struct OutputWriter {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl OutputWriter {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            files: Vec::new(),
        }
    }

    /// Create the output directory structure, including empty type directories.
    ///
    /// Type directories are emptied first so endpoints of removed or renamed
    /// guides do not outlive them.
    fn create_dirs(&self) -> Result<()> {
        let guides_root = self.root.join(GUIDES_OUTPUT_DIR);
        let type_dirs: Vec<PathBuf> = Classification::ALL
            .iter()
            .map(|kind| guides_root.join(kind.dir_name()))
            .collect();

        for dir in &type_dirs {
            if dir.is_dir() {
                std::fs::remove_dir_all(dir).map_err(|e| GuideGenError::io(dir, e))?;
                debug!(path = %dir.display(), "cleared previous guide endpoints");
            }
        }

        let mut dirs = vec![self.root.clone(), self.root.join("api"), guides_root];
        dirs.extend(type_dirs);
        for dir in &dirs {
            std::fs::create_dir_all(dir).map_err(|e| GuideGenError::io(dir, e))?;
        }

        debug!(path = %self.root.display(), "directory structure created");
        Ok(())
    }

    /// Write a JSON file (pretty-printed, 2-space indent).
    fn write_json<T: serde::Serialize>(&mut self, rel: &str, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| GuideGenError::Serialize(format!("{rel}: {e}")))?;
        self.write_text(rel, &json)
    }

    fn write_text(&mut self, rel: &str, content: &str) -> Result<()> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GuideGenError::io(parent, e))?;
        }
        std::fs::write(&path, content).map_err(|e| GuideGenError::io(&path, e))?;
        debug!(path = %path.display(), "wrote file");
        self.files.push(PathBuf::from(rel));
        Ok(())
    }

    fn into_files(self) -> Vec<PathBuf> {
        self.files
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
