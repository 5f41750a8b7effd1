//! End-to-end builds against throwaway project directories.

use std::path::{Path, PathBuf};

use guidegen_core::{build, build_dated};
use guidegen_shared::{
    AppConfig, BuildConfig, Classification, GuideEndpoint, GuideGenError, GuideManifest,
};

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("guidegen-build-test-{}", uuid::Uuid::now_v7()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn config_for(root: &Path) -> BuildConfig {
    BuildConfig::resolve(&AppConfig::default(), &root.join("README.md"), &root.join("out"))
}

fn write(path: &Path, content: impl AsRef<[u8]>) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn python_guide_scenario() {
    let tmp = temp_dir();
    write(
        &tmp.join("README.md"),
        "<!--intro-->\n## The Golden Rules\nRule text. [Python Guide](./guides/python.md)\n",
    );
    write(&tmp.join("docs/guides/python.md"), "# Python\nBody.");

    build(&config_for(&tmp)).unwrap();

    let manifest: GuideManifest = read_json(&tmp.join("out/api/guide.json"));
    assert_eq!(manifest.references.len(), 1);
    let reference = &manifest.references[0];
    assert_eq!(reference.name, "Python Guide");
    assert_eq!(reference.path, "./guides/python.md");
    assert_eq!(reference.kind, Classification::Language);
    assert_eq!(
        reference.api_url.as_deref(),
        Some("api/guides/languages/python.json")
    );
    assert_eq!(
        manifest.content,
        "## The Golden Rules\nRule text. [Python Guide](./guides/python.md)\n"
    );

    let endpoint: GuideEndpoint = read_json(&tmp.join("out/api/guides/languages/python.json"));
    assert_eq!(endpoint.metadata.name, "Python");
    assert_eq!(endpoint.content, "# Python\nBody.");

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn guide_without_heading_is_titled_by_file_name() {
    let tmp = temp_dir();
    write(&tmp.join("README.md"), "## The Golden Rules\n");
    write(&tmp.join("docs/guides/weird.md"), "Just text.\n");

    let report = build(&config_for(&tmp)).unwrap();
    assert_eq!(report.guides.len(), 1);
    assert_eq!(report.guides[0].title, "weird");

    let endpoint: GuideEndpoint = read_json(&tmp.join("out/api/guides/others/weird.json"));
    assert_eq!(endpoint.metadata.name, "weird");

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn missing_anchor_writes_nothing() {
    let tmp = temp_dir();
    write(&tmp.join("README.md"), "# Guide\n\nNo rules here.\n");
    write(&tmp.join("docs/guides/python.md"), "# Python\n");

    let err = build(&config_for(&tmp)).unwrap_err();
    assert!(matches!(err, GuideGenError::AnchorNotFound { .. }));
    assert!(!tmp.join("out").exists());

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn unreadable_source_is_fatal() {
    let tmp = temp_dir();

    let err = build(&config_for(&tmp)).unwrap_err();
    assert!(matches!(err, GuideGenError::Io { .. }));
    assert!(!tmp.join("out").exists());

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn unreadable_guide_is_skipped() {
    let tmp = temp_dir();
    write(&tmp.join("README.md"), "## The Golden Rules\n");
    write(&tmp.join("docs/guides/broken.md"), [0xff, 0xfe, 0xfd]);
    write(&tmp.join("docs/guides/shell.md"), "# Shell\n");

    let report = build(&config_for(&tmp)).unwrap();
    let titles: Vec<&str> = report.guides.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Shell"]);
    assert!(!tmp.join("out/api/guides/others/broken.json").exists());

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn rebuild_is_byte_identical() {
    let tmp = temp_dir();
    write(
        &tmp.join("README.md"),
        "## The Golden Rules\n[SQL](docs/guides/sql.md) [CLI](docs/guides/cli.md)\n",
    );
    write(&tmp.join("docs/guides/sql.md"), "# SQL\n");
    write(&tmp.join("docs/guides/cli.md"), "# CLI\n");
    write(&tmp.join("docs/guides/open-source.md"), "# Open Source\n");
    let config = config_for(&tmp);

    let first = build_dated(&config, "2025-01-01").unwrap();
    let snapshot: Vec<Vec<u8>> = first
        .files
        .iter()
        .map(|f| std::fs::read(tmp.join("out").join(f)).unwrap())
        .collect();

    let second = build_dated(&config, "2025-01-01").unwrap();
    assert_eq!(first.files, second.files);
    for (file, before) in first.files.iter().zip(snapshot) {
        let after = std::fs::read(tmp.join("out").join(file)).unwrap();
        assert_eq!(before, after, "{} changed between builds", file.display());
    }

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn every_json_file_carries_metadata() {
    let tmp = temp_dir();
    write(&tmp.join("README.md"), "## The Golden Rules\n");
    write(&tmp.join("docs/guides/postgresql.md"), "# PostgreSQL\n");
    write(&tmp.join("version.txt"), "2.0.0\n");

    let report = build_dated(&config_for(&tmp), "2025-06-30").unwrap();
    assert_eq!(report.version, "2.0.0");

    for rel in ["api/guide.json", "api/guides/platforms/postgresql.json"] {
        let value: serde_json::Value = read_json(&tmp.join("out").join(rel));
        let metadata = &value["metadata"];
        assert_eq!(metadata["version"], "2.0.0", "{rel}");
        assert_eq!(metadata["lastUpdated"], "2025-06-30", "{rel}");
        assert!(metadata["name"].is_string(), "{rel}");
        assert!(metadata["source"].is_string(), "{rel}");
    }

    let index: serde_json::Value = read_json(&tmp.join("out/api.json"));
    assert_eq!(index["version"], "2.0.0");
    assert_eq!(index["lastUpdated"], "2025-06-30");

    let badge: serde_json::Value = read_json(&tmp.join("out/badge.json"));
    assert_eq!(badge["message"], "2.0.0");

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn sections_are_extracted_into_main_guide() {
    let tmp = temp_dir();
    write(
        &tmp.join("README.md"),
        "# Title\n## The Golden Rules\nRules.\n## The Developer Guide\nSteps.\n### Plan\nThink.\n",
    );

    build(&config_for(&tmp)).unwrap();

    let manifest: GuideManifest = read_json(&tmp.join("out/api/guide.json"));
    let names: Vec<&str> = manifest.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["golden_rules", "developer_guide", "specialised_guides"]);
    assert_eq!(manifest.sections[0].content, "## The Golden Rules\nRules.\n");
    assert_eq!(
        manifest.sections[1].content,
        "## The Developer Guide\nSteps.\n### Plan\nThink.\n"
    );
    assert_eq!(manifest.sections[2].content, "");

    let _ = std::fs::remove_dir_all(&tmp);
}
