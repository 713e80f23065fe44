//! logsidian CLI entry point.

use clap::Parser;
use logsidian::cli::args::{Cli, Commands};
use logsidian::cli::output::Output;
use logsidian::cli::{convert, migrate};
use logsidian::config::Config;
use logsidian::error::{ExitCode as MigrateExitCode, MigrateError};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code().code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<MigrateExitCode, MigrateError> {
    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.output_format());

    match &cli.command {
        Commands::Migrate(args) => migrate::run(args, &config, &output),
        Commands::Convert(args) => convert::run(args, &config, &output),
    }
}
