//! CLI argument definitions and the build command.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use guidegen_core::BuildReport;
use guidegen_shared::cli::LogFormat;
use guidegen_shared::{BuildConfig, load_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Convert the guide's Markdown into a JSON API and HTML index.
#[derive(Parser)]
#[command(
    name = "generate-json",
    version,
    about = "Convert the root guide and its satellite guides into JSON API files.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Root Markdown document (e.g. README.md).
    pub source: PathBuf,

    /// Directory to write index.html and the api/ tree into.
    pub output: PathBuf,

    /// Optional guidegen.toml.
    #[arg(long, env = "GUIDEGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

// ---------------------------------------------------------------------------
// Build command
// ---------------------------------------------------------------------------

/// Run one full build and print every file it produced.
pub(crate) fn run(cli: &Cli) -> Result<()> {
    let app_config = load_config(cli.config.as_deref())?;
    let config = BuildConfig::resolve(&app_config, &cli.source, &cli.output);

    info!(
        source = %config.source_path.display(),
        output = %config.output_dir.display(),
        "generating JSON API"
    );

    let report = guidegen_core::build(&config)?;
    print_summary(&report);

    Ok(())
}

fn print_summary(report: &BuildReport) {
    for file in &report.files {
        println!("✓ Created {}", file.display());
    }
    println!();
    println!(
        "Generated {} files in {} (version {}, {} guides, {} references)",
        report.files.len(),
        report.output_dir.display(),
        report.version,
        report.guides.len(),
        report.reference_count
    );
    println!("Successfully generated JSON API files.");
}
