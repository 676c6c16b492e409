use anyhow::Result;
use clap::Parser;
use colored::*;
use seopulse::cli::Cli;
use seopulse::config::Config;
use seopulse::run;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Cli::parse();

    // Explicit --config beats the default search paths
    let config = match &args.config {
        Some(path) => Config::from_file(std::path::Path::new(path))?,
        None => Config::from_default_paths()?.unwrap_or_default(),
    };
    let args = config.merge_with_cli(&args);

    if let Err(e) = run(args, config).await {
        eprintln!("{} {}", "Error:".bright_red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
