//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// mbundle: bundle, minify and version JS/CSS groups
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: mbundle.toml)
    #[arg(short = 'C', long, global = true, default_value = "mbundle.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Bundle every configured group
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Validate the config and list the groups that would be built
    #[command(visible_alias = "c")]
    Check,
}

/// Build command arguments
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Output directory (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content-hashed file names and manifest.json
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub versioning: Option<bool>,

    /// Minify bundles
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } => Some(build_args),
            Commands::Check => None,
        }
    }
}
