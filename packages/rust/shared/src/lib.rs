//! Shared types, error model, and configuration for guidegen.
//!
//! This crate is the foundation depended on by all other guidegen crates.
//! It provides:
//! - [`GuideGenError`]: the unified error type
//! - Domain types ([`Classification`], [`GuideReference`], [`GuideDocument`], output documents)
//! - Configuration ([`AppConfig`], [`BuildConfig`], [`ServeConfig`], config loading)
//! - Binary plumbing ([`cli::parse_args`], [`cli::init_tracing`])

pub mod cli;
pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildConfig, DevConfig, GuidesConfig, SectionSpec, ServeConfig,
    SiteConfig, load_config, load_config_from, source_dir, validate_config,
};
pub use error::{GuideGenError, Result};
pub use types::{
    ApiEndpoints, ApiIndex, BADGE_SCHEMA_VERSION, CLASSIFICATION_RULES, Classification,
    EndpointDescriptor, GuideDocument, GuideEndpoint, GuideManifest, GuideReference,
    GuideSection, Metadata, VersionBadge,
};
