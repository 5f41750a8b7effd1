//! generate-json: build the guide's JSON API from Markdown.
//!
//! Takes the root guide document and an output directory, and writes
//! `index.html`, `api.json`, `badge.json` and the `api/` tree.

mod commands;

use color_eyre::eyre::Result;
use guidegen_shared::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: commands::Cli = cli::parse_args();
    cli::init_tracing(args.verbose, args.log_format);

    if let Err(e) = commands::run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}
