//! Core domain types for the guide JSON API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Schema version for the shields.io endpoint badge format.
pub const BADGE_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Topic tag assigned to a guide or a reference from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Language,
    Pattern,
    Platform,
    Other,
}

/// Ordered `(substring, tag)` rules. Matching is case-insensitive and the
/// first rule whose substring occurs in the path wins.
pub const CLASSIFICATION_RULES: &[(&str, Classification)] = &[
    ("python", Classification::Language),
    ("shell", Classification::Language),
    ("make", Classification::Pattern),
    ("cicd", Classification::Pattern),
    ("ci-cd", Classification::Pattern),
    ("cli", Classification::Pattern),
    ("documentation", Classification::Pattern),
    ("open-source", Classification::Pattern),
    ("postgresql", Classification::Platform),
    ("sql", Classification::Platform),
];

impl Classification {
    /// Every classification, in display order.
    pub const ALL: [Classification; 4] = [
        Classification::Language,
        Classification::Pattern,
        Classification::Platform,
        Classification::Other,
    ];

    /// Classify a path by walking [`CLASSIFICATION_RULES`]; no match is `Other`.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_lowercase();
        CLASSIFICATION_RULES
            .iter()
            .find(|(needle, _)| lower.contains(needle))
            .map(|(_, tag)| *tag)
            .unwrap_or(Classification::Other)
    }

    /// The lowercase tag used in JSON (`language`, `pattern`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Language => "language",
            Classification::Pattern => "pattern",
            Classification::Platform => "platform",
            Classification::Other => "other",
        }
    }

    /// Pluralized directory name for guide endpoints (`languages`, `others`, ...).
    pub fn dir_name(self) -> String {
        format!("{}s", self.as_str())
    }

    /// Capitalized heading label (`Language`, `Pattern`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Classification::Language => "Language",
            Classification::Pattern => "Pattern",
            Classification::Platform => "Platform",
            Classification::Other => "Other",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Extracted content
// ---------------------------------------------------------------------------

/// A link from the root document to a satellite guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideReference {
    /// Link label.
    pub name: String,
    /// Link target as written in the source document.
    pub path: String,
    /// Classification of `path`.
    #[serde(rename = "type")]
    pub kind: Classification,
    /// `{base}/{type}s/{stem}.json` endpoint for this guide.
    #[serde(rename = "apiUrl", default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// A processed satellite guide file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideDocument {
    pub title: String,
    pub content: String,
}

/// A named slice of the root document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideSection {
    /// Stable identifier (e.g. `golden_rules`).
    pub name: String,
    /// Heading text without the leading hashes.
    pub title: String,
    /// Heading line through the end of the section; empty if the heading is absent.
    pub content: String,
}

// ---------------------------------------------------------------------------
// Output documents
// ---------------------------------------------------------------------------

/// The `metadata` block shared by every generated guide document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Classification>,
    pub version: String,
    /// ISO date (`YYYY-MM-DD`).
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub source: String,
}

/// `api/guide.json`: the combined main guide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideManifest {
    pub metadata: Metadata,
    pub content: String,
    #[serde(default)]
    pub sections: Vec<GuideSection>,
    pub references: Vec<GuideReference>,
}

/// `api/guides/<type>s/<stem>.json`: one satellite guide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideEndpoint {
    pub metadata: Metadata,
    pub content: String,
}

/// A path plus human description, as listed in `api.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub path: String,
    pub description: String,
}

/// The `endpoints` block of `api.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEndpoints {
    pub main_guide: EndpointDescriptor,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub language_guides: BTreeMap<String, EndpointDescriptor>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pattern_guides: BTreeMap<String, EndpointDescriptor>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub platform_guides: BTreeMap<String, EndpointDescriptor>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other_guides: BTreeMap<String, EndpointDescriptor>,
}

impl ApiEndpoints {
    /// The per-type endpoint map for a classification.
    pub fn guides_mut(&mut self, kind: Classification) -> &mut BTreeMap<String, EndpointDescriptor> {
        match kind {
            Classification::Language => &mut self.language_guides,
            Classification::Pattern => &mut self.pattern_guides,
            Classification::Platform => &mut self.platform_guides,
            Classification::Other => &mut self.other_guides,
        }
    }
}

/// `api.json`: summary of every generated endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiIndex {
    pub name: String,
    pub description: String,
    pub version: String,
    pub source: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub endpoints: ApiEndpoints,
}

/// `badge.json`: a shields.io endpoint badge carrying the version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionBadge {
    pub schema_version: u32,
    pub label: String,
    pub message: String,
    pub color: String,
}

impl VersionBadge {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            schema_version: BADGE_SCHEMA_VERSION,
            label: "version".into(),
            message: version.into(),
            color: "blue".into(),
        }
    }
}
