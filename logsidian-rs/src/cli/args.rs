//! CLI argument definitions using clap.

use crate::transform::Step;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logsidian")]
#[command(author, version, about = "Migrate a logseq graph into an Obsidian vault", long_about = None)]
pub struct Cli {
    /// Path to a config file (defaults to ~/.config/logsidian/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Log level from `--quiet` / `-v`.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy a logseq graph to a new directory and convert it to an Obsidian vault
    Migrate(MigrateArgs),

    /// Convert a single markdown document and print the result
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// The logseq graph to migrate
    #[arg(long = "in", default_value = ".")]
    pub input: PathBuf,

    /// Where to write the vault
    #[arg(long = "out")]
    pub output: PathBuf,

    /// Replace the output directory if it exists
    #[arg(long)]
    pub force: bool,

    /// Keep logseq's internal directory in the vault
    #[arg(long)]
    pub keep_logseq_dir: bool,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Name of logseq's internal directory (overrides config)
    #[arg(long)]
    pub logseq_dir: Option<String>,

    /// App config path relative to the vault (overrides config)
    #[arg(long)]
    pub app_config: Option<PathBuf>,

    /// Skip a migration step (can be repeated)
    #[arg(long, value_enum)]
    pub skip: Vec<Step>,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Markdown file to convert (reads stdin if omitted)
    pub file: Option<PathBuf>,

    /// Skip a conversion step (can be repeated)
    #[arg(long, value_enum)]
    pub skip: Vec<Step>,
}
