//! dev-server: rebuild the guide API on change and preview it over HTTP.

mod commands;
mod server;

use color_eyre::eyre::Result;
use guidegen_shared::cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args: commands::Cli = cli::parse_args();
    cli::init_tracing(args.verbose, args.log_format);

    if let Err(e) = commands::run(&args).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
