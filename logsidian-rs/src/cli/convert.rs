//! `convert` command: run the text pipeline over one document.

use crate::cli::args::ConvertArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::{ExitCode, MigrateError, Result};
use crate::transform::{Pipeline, PipelineOutput};
use std::io::Read;

/// Convert text with the configured steps.
pub fn convert_text(text: &str, args: &ConvertArgs, config: &Config) -> PipelineOutput {
    let skip = config.migrate.skip.iter().chain(args.skip.iter()).copied();
    Pipeline::with_skipped(skip).run(text)
}

/// Execute convert command.
pub fn run(args: &ConvertArgs, config: &Config, output: &Output) -> Result<ExitCode> {
    let (name, text) = match args.file {
        Some(ref path) => {
            if !path.is_file() {
                return Err(MigrateError::InputNotFound(path.clone()));
            }
            (path.display().to_string(), std::fs::read_to_string(path)?)
        }
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            ("<stdin>".to_string(), text)
        }
    };

    let result = convert_text(&text, args, config);
    for step in &result.changed {
        log::info!("{} for {}", step.describe(), name);
    }

    output.print_document(&result.text)?;
    Ok(ExitCode::Success)
}
