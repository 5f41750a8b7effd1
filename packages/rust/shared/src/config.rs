//! Application configuration for guidegen.
//!
//! An optional `guidegen.toml` tunes site metadata, the guides location and
//! the dev server. CLI arguments supply the source document and output
//! directory; everything else falls back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GuideGenError, Result};

// ---------------------------------------------------------------------------
// Config structs (matching guidegen.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Site metadata stamped into every output document.
    #[serde(default)]
    pub site: SiteConfig,

    /// Guide discovery and extraction settings.
    #[serde(default)]
    pub guides: GuidesConfig,

    /// Dev server settings.
    #[serde(default)]
    pub dev: DevConfig,
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Name of the main guide.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// One-line description used in `api.json`.
    #[serde(default = "default_description")]
    pub description: String,

    /// Repository URL the content is published from.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Version used when the version file is missing or unreadable.
    #[serde(default = "default_version")]
    pub default_version: String,

    /// Version file, relative to the source document's directory.
    #[serde(default = "default_version_file")]
    pub version_file: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            description: default_description(),
            source_url: default_source_url(),
            default_version: default_version(),
            version_file: default_version_file(),
        }
    }
}

fn default_site_name() -> String {
    "AI Developer Guide".into()
}
fn default_description() -> String {
    "Structured JSON API for the AI Developer Guide".into()
}
fn default_source_url() -> String {
    "https://github.com/dwmkerr/ai-developer-guide".into()
}
fn default_version() -> String {
    "0.1.0".into()
}
fn default_version_file() -> String {
    "version.txt".into()
}

/// `[guides]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidesConfig {
    /// Satellite guides directory, relative to the source document's directory.
    #[serde(default = "default_guides_dir")]
    pub dir: String,

    /// Base path prepended to reference `apiUrl`s.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Heading that marks where published content begins.
    #[serde(default = "default_anchor")]
    pub anchor: String,

    /// Named subsections extracted into `api/guide.json`, in output order.
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionSpec>,
}

impl Default for GuidesConfig {
    fn default() -> Self {
        Self {
            dir: default_guides_dir(),
            api_base: default_api_base(),
            anchor: default_anchor(),
            sections: default_sections(),
        }
    }
}

/// `[[guides.sections]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Stable identifier in the output.
    pub name: String,
    /// Exact heading line, hashes included (e.g. `## The Golden Rules`).
    pub heading: String,
}

impl SectionSpec {
    pub fn new(name: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            heading: heading.into(),
        }
    }
}

fn default_guides_dir() -> String {
    "docs/guides".into()
}
fn default_api_base() -> String {
    "api/guides".into()
}
fn default_anchor() -> String {
    "## The Golden Rules".into()
}
fn default_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec::new("golden_rules", "## The Golden Rules"),
        SectionSpec::new("developer_guide", "## The Developer Guide"),
        SectionSpec::new("specialised_guides", "## Specialised Guides"),
    ]
}

/// `[dev]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// Address the preview server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Preview server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum ms between two rebuilds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Extra files or directories whose changes trigger a rebuild.
    #[serde(default)]
    pub watch_extra: Vec<String>,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            debounce_ms: default_debounce_ms(),
            watch_extra: Vec::new(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    9090
}
fn default_debounce_ms() -> u64 {
    1000
}

// ---------------------------------------------------------------------------
// Build config (runtime, merged from config + CLI arguments)
// ---------------------------------------------------------------------------

/// Everything one build needs, resolved to concrete paths.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root Markdown document.
    pub source_path: PathBuf,
    /// Output root (`index.html`, `api/`, ...).
    pub output_dir: PathBuf,
    /// Directory of satellite guides.
    pub guides_dir: PathBuf,
    /// Optional version file.
    pub version_file: PathBuf,
    /// Fallback version.
    pub default_version: String,
    pub site_name: String,
    pub site_description: String,
    pub source_url: String,
    pub api_base: String,
    pub anchor: String,
    pub sections: Vec<SectionSpec>,
}

impl BuildConfig {
    /// Resolve relative config paths against the source document's directory.
    pub fn resolve(config: &AppConfig, source_path: &Path, output_dir: &Path) -> Self {
        let source_dir = source_dir(source_path);
        Self {
            source_path: source_path.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            guides_dir: source_dir.join(&config.guides.dir),
            version_file: source_dir.join(&config.site.version_file),
            default_version: config.site.default_version.clone(),
            site_name: config.site.name.clone(),
            site_description: config.site.description.clone(),
            source_url: config.site.source_url.trim_end_matches('/').to_string(),
            api_base: config.guides.api_base.trim_end_matches('/').to_string(),
            anchor: config.guides.anchor.clone(),
            sections: config.guides.sections.clone(),
        }
    }
}

/// Runtime preview-server configuration.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub bind: String,
    pub port: u16,
    pub debounce: Duration,
    /// Extra watch paths, resolved against the source document's directory.
    pub watch_extra: Vec<PathBuf>,
}

impl ServeConfig {
    pub fn resolve(config: &AppConfig, source_path: &Path, port: Option<u16>) -> Self {
        let source_dir = source_dir(source_path);
        Self {
            bind: config.dev.bind.clone(),
            port: port.unwrap_or(config.dev.port),
            debounce: Duration::from_millis(config.dev.debounce_ms),
            watch_extra: config
                .dev
                .watch_extra
                .iter()
                .map(|p| source_dir.join(p))
                .collect(),
        }
    }

    /// `bind:port` socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Directory containing the source document (`.` for a bare file name).
pub fn source_dir(source_path: &Path) -> PathBuf {
    match source_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the application config. Returns defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config_from(path),
        None => {
            tracing::debug!("no config file given, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GuideGenError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        GuideGenError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Reject configs that cannot produce a usable build.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.guides.anchor.trim().is_empty() {
        return Err(GuideGenError::validation("guides.anchor must not be empty"));
    }
    for section in &config.guides.sections {
        if !section.heading.starts_with('#') {
            return Err(GuideGenError::validation(format!(
                "section '{}' heading must start with '#': {:?}",
                section.name, section.heading
            )));
        }
    }
    if config.dev.port == 0 {
        return Err(GuideGenError::validation("dev.port must be non-zero"));
    }
    Ok(())
}
