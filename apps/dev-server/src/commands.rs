//! CLI argument definitions and the serve command.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use guidegen_core::BuildReport;
use guidegen_core::watch::{self, RebuildReporter, WatchPlan};
use guidegen_shared::cli::LogFormat;
use guidegen_shared::{BuildConfig, GuideGenError, ServeConfig, load_config};
use tracing::info;

use crate::server;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Rebuild the guide API on every source change and serve it locally.
#[derive(Parser)]
#[command(
    name = "dev-server",
    version,
    about = "Watch the guide sources, rebuild on change, and serve the output.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Root Markdown document (e.g. README.md).
    pub source: PathBuf,

    /// Directory the site is built into and served from.
    pub output: PathBuf,

    /// Port to listen on (overrides the config file).
    #[arg(short, long)]
    pub port: Option<u16>,

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
// Serve command
// ---------------------------------------------------------------------------

/// Prints rebuild progress to the console.
struct ConsoleReporter;

impl RebuildReporter for ConsoleReporter {
    fn started(&self) {
        println!();
        println!(
            "🔄 Rebuilding site... ({})",
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    fn succeeded(&self, report: &BuildReport) {
        println!("✅ Site rebuilt successfully!");
        println!(
            "   {} files, {} guides, version {}",
            report.files.len(),
            report.guides.len(),
            report.version
        );
    }

    fn failed(&self, error: &GuideGenError) {
        println!("❌ Build failed: {error}");
    }
}

/// Build once, then watch and serve until Ctrl+C.
pub(crate) async fn run(cli: &Cli) -> Result<()> {
    let app_config = load_config(cli.config.as_deref())?;
    let build = BuildConfig::resolve(&app_config, &cli.source, &cli.output);
    let serve = ServeConfig::resolve(&app_config, &cli.source, cli.port);

    println!("🚀 Starting development server...");
    println!("📁 Serving files from: {}", build.output_dir.display());
    println!("🌐 Server: http://{}", serve.addr());
    println!("👀 Watching for changes in: {}", build.guides_dir.display());

    let initial = build.clone();
    tokio::task::spawn_blocking(move || watch::rebuild(&initial, &ConsoleReporter)).await?;

    let plan = WatchPlan::new(&build, cli.config.as_deref(), &serve.watch_extra);
    let (watcher, events) = watch::spawn_watcher(&plan)?;

    let output_dir = build.output_dir.clone();
    let debounce = serve.debounce;
    let rebuild_loop = tokio::task::spawn_blocking(move || {
        watch::run_rebuild_loop(events, &build, &plan, debounce, &ConsoleReporter);
    });

    println!("Press Ctrl+C to stop");
    server::serve(&serve.addr(), &output_dir)
        .await
        .wrap_err_with(|| format!("failed to serve on {}", serve.addr()))?;

    // Dropping the watcher closes the event channel and ends the loop.
    drop(watcher);
    rebuild_loop.await?;

    info!("development server stopped");
    println!("\n👋 Shutting down development server...");
    Ok(())
}
