mod answers;
mod config;
mod converter;
mod error;
mod logging;
mod models;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, Config};
use converter::Converter;
use std::process::ExitCode;
use tracing::info;

fn run() -> Result<()> {
    logging::init()?;

    let config = Config::from(Cli::parse());

    info!("Cleaning answers.");
    let summary = Converter::run(&config)
        .with_context(|| format!("Failed to convert {}", config.input_path.display()))?;
    info!(
        "Wrote {} files to {}",
        summary.files.len(),
        config.output_dir.display()
    );
    info!("Done.");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
