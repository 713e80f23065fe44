//! `migrate` command.

use crate::cli::args::MigrateArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::migrate::{migrate, MigrateOptions};

/// Build migration options: config file first, then command-line flags.
pub fn options(args: &MigrateArgs, config: &Config) -> MigrateOptions {
    let mut options = MigrateOptions::new(&args.input, &args.output, &config.migrate);
    options.force = args.force;
    options.keep_logseq_dir = args.keep_logseq_dir;
    options.dry_run = args.dry_run;
    if let Some(ref dir) = args.logseq_dir {
        options.logseq_dir = dir.clone();
    }
    if let Some(ref path) = args.app_config {
        options.app_config = path.clone();
    }
    for step in &args.skip {
        if !options.skip.contains(step) {
            options.skip.push(*step);
        }
    }
    options
}

/// Execute migrate command.
pub fn run(args: &MigrateArgs, config: &Config, output: &Output) -> Result<ExitCode> {
    let report = migrate(&options(args, config))?;

    if report.dry_run {
        log::info!(
            "dry run: {} of {} files would change",
            report.files_changed,
            report.files_processed
        );
    } else {
        log::info!(
            "migrated {} files into {}",
            report.files_processed,
            report.output.display()
        );
    }

    output.print(&report)?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Cli, Commands};
    use crate::transform::Step;
    use clap::Parser;
    use std::path::PathBuf;

    fn migrate_args(argv: &[&str]) -> MigrateArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Migrate(args) => args,
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::from_toml_str(
            "[migrate]\nlogseq_dir = \"ls\"\nskip = [\"logbooks\"]\n",
        )
        .unwrap();
        let args = migrate_args(&[
            "logsidian", "migrate", "--out", "vault", "--logseq-dir", "internal", "--skip",
            "logbooks", "--skip", "tag-links", "--dry-run",
        ]);

        let options = options(&args, &config);

        assert_eq!(options.logseq_dir, "internal");
        assert_eq!(options.skip, vec![Step::Logbooks, Step::TagLinks]);
        assert!(options.dry_run);
        assert_eq!(options.app_config, PathBuf::from(".obsidian/app.json"));
    }

    #[test]
    fn test_config_defaults_apply() {
        let config = Config::from_toml_str("[migrate]\napp_config = \"cfg/app.json\"\n").unwrap();
        let args = migrate_args(&["logsidian", "migrate", "--out", "vault"]);

        let options = options(&args, &config);

        assert_eq!(options.logseq_dir, "logseq");
        assert_eq!(options.app_config, PathBuf::from("cfg/app.json"));
        assert!(!options.force);
    }
}
