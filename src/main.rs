//! mbundle command-line entry point.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use mbundle::cli::{self, Cli, Commands};
use mbundle::config::BundleConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = BundleConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_bundles(&config).map(|_| ()),
        Commands::Check => cli::check::check_config(&config),
    }
}
