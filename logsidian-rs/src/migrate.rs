//! Batch migration of a logseq graph into an Obsidian vault.
//!
//! The graph is copied to the output directory first and every markdown
//! file in the copy is then rewritten in place. Documents are independent,
//! so they are processed in parallel.

use crate::config::MigrateConfig;
use crate::error::{MigrateError, Result};
use crate::obsidian::{patch_app_config, patched_app_config};
use crate::reorganize::{reorganize_under, rewrite_relative_paths, to_slash};
use crate::transform::{Pipeline, Step};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Options for a migration run.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// The logseq graph.
    pub input: PathBuf,
    /// Where the vault is written. Must not exist unless `force` is set.
    pub output: PathBuf,
    /// Replace an existing output directory.
    pub force: bool,
    /// Keep logseq's internal directory in the copy.
    pub keep_logseq_dir: bool,
    /// Compute the report without touching the filesystem.
    pub dry_run: bool,
    pub logseq_dir: String,
    /// App config location, relative to the output root.
    pub app_config: PathBuf,
    pub skip: Vec<Step>,
}

impl MigrateOptions {
    /// Options with defaults taken from config.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, config: &MigrateConfig) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            force: false,
            keep_logseq_dir: false,
            dry_run: false,
            logseq_dir: config.logseq_dir.clone(),
            app_config: config.app_config.clone(),
            skip: config.skip.clone(),
        }
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::with_skipped(self.skip.iter().copied())
    }

    /// Top-level directory left out of the markdown walk.
    fn excluded_dir(&self) -> Option<&str> {
        (!self.keep_logseq_dir).then_some(self.logseq_dir.as_str())
    }
}

/// A file moved out of an escaped-slash name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Steps that changed a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub steps: Vec<Step>,
}

/// Summary of a migration run. Paths are relative to the output root.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dry_run: bool,
    pub files_processed: usize,
    pub files_changed: usize,
    pub app_config_updated: bool,
    /// Markdown files that were not valid UTF-8.
    pub skipped: Vec<PathBuf>,
    pub moved: Vec<MovedFile>,
    pub changes: Vec<FileChange>,
}

/// What happened to one document.
#[derive(Debug, Clone)]
struct DocumentOutcome {
    path: PathBuf,
    moved_from: Option<PathBuf>,
    changed: Vec<Step>,
    skipped: bool,
}

/// A document after relocation, before its text is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlacedDocument {
    /// Where the text is read from, relative to the root.
    current: PathBuf,
    /// Final location, relative to the root.
    path: PathBuf,
    moved_from: Option<PathBuf>,
}

impl PlacedDocument {
    fn unmoved(relative: &Path) -> Self {
        Self {
            current: relative.to_path_buf(),
            path: relative.to_path_buf(),
            moved_from: None,
        }
    }
}

/// Processes documents under one root.
struct Migrator<'a> {
    root: &'a Path,
    pipeline: Pipeline,
    write: bool,
}

impl Migrator<'_> {
    /// Move escaped-slash files into nested folders, one at a time.
    ///
    /// A destination is taken by the first document that expands to it.
    /// Later documents with the same destination, or one that already
    /// exists, stay where they are.
    fn relocate(&self, documents: &[PathBuf]) -> Result<Vec<PlacedDocument>> {
        if !self.pipeline.is_enabled(Step::Reorganize) {
            return Ok(documents.iter().map(|d| PlacedDocument::unmoved(d)).collect());
        }

        let mut claimed = HashSet::new();
        let mut placed = Vec::with_capacity(documents.len());

        for relative in documents {
            let Some((new_relative, target_dir)) = reorganize_under(self.root, relative) else {
                placed.push(PlacedDocument::unmoved(relative));
                continue;
            };

            let source = self.root.join(relative);
            let destination = self.root.join(&new_relative);
            if claimed.contains(&new_relative) || destination.exists() {
                log::warn!(
                    "not moving {}: {} already exists",
                    source.display(),
                    destination.display()
                );
                placed.push(PlacedDocument::unmoved(relative));
                continue;
            }

            if self.write {
                fs::create_dir_all(&target_dir)?;
                fs::rename(&source, &destination)?;
            }
            log::info!("moved {} to {}", source.display(), destination.display());

            claimed.insert(new_relative.clone());
            placed.push(PlacedDocument {
                current: if self.write {
                    new_relative.clone()
                } else {
                    relative.clone()
                },
                path: new_relative,
                moved_from: Some(relative.clone()),
            });
        }

        Ok(placed)
    }

    fn process(&self, document: &PlacedDocument) -> Result<DocumentOutcome> {
        let source = self.root.join(&document.current);
        let original = match String::from_utf8(fs::read(&source)?) {
            Ok(text) => text,
            Err(_) => {
                log::warn!("skipping {}: not valid UTF-8", source.display());
                return Ok(DocumentOutcome {
                    path: document.path.clone(),
                    moved_from: document.moved_from.clone(),
                    changed: Vec::new(),
                    skipped: true,
                });
            }
        };

        let mut changed = Vec::new();
        let text = match &document.moved_from {
            Some(from) => {
                let text =
                    rewrite_relative_paths(&original, &to_slash(from), &to_slash(&document.path));
                if text != original {
                    log::info!(
                        "{} in {}",
                        Step::Reorganize.describe(),
                        self.root.join(&document.path).display()
                    );
                    changed.push(Step::Reorganize);
                }
                text
            }
            None => original.clone(),
        };

        let output = self.pipeline.run(&text);
        for step in &output.changed {
            log::info!("{} for {}", step.describe(), document.path.display());
        }
        changed.extend(output.changed);

        if self.write && output.text != original {
            fs::write(self.root.join(&document.path), &output.text)?;
        }

        Ok(DocumentOutcome {
            path: document.path.clone(),
            moved_from: document.moved_from.clone(),
            changed,
            skipped: false,
        })
    }

    /// Relocate sequentially, then rewrite every document in parallel.
    fn process_all(&self, documents: &[PathBuf]) -> Result<Vec<DocumentOutcome>> {
        let placed = self.relocate(documents)?;
        placed
            .par_iter()
            .map(|document| self.process(document))
            .collect()
    }
}

/// Migrate a logseq graph according to `options`.
pub fn migrate(options: &MigrateOptions) -> Result<MigrationReport> {
    if !options.input.exists() {
        return Err(MigrateError::InputNotFound(options.input.clone()));
    }
    let input = lexical_absolute(&options.input)?;
    let output = lexical_absolute(&options.output)?;
    if output.starts_with(&input) {
        return Err(MigrateError::Other(format!(
            "output {} cannot be inside input {}",
            options.output.display(),
            options.input.display()
        )));
    }
    if input.starts_with(&output) {
        return Err(MigrateError::Other(format!(
            "input {} cannot be inside output {}",
            options.input.display(),
            options.output.display()
        )));
    }

    if options.dry_run {
        return plan(options);
    }

    prepare_output(&options.output, options.force)?;
    copy_tree(&options.input, &options.output)?;
    log::info!("copied logseq graph to {}", options.output.display());

    if !options.keep_logseq_dir {
        remove_logseq_dir(&options.output, &options.logseq_dir)?;
    }

    let documents = collect_markdown(&options.output, options.excluded_dir())?;
    let migrator = Migrator {
        root: &options.output,
        pipeline: options.pipeline(),
        write: true,
    };
    let outcomes = migrator.process_all(&documents)?;

    let app_config_updated = patch_app_config(&options.output.join(&options.app_config))?;

    Ok(build_report(options, outcomes, app_config_updated))
}

/// Absolute form of a path with `.` and `..` folded away.
fn lexical_absolute(path: &Path) -> Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Dry run: read the input graph and report what a migration would do.
fn plan(options: &MigrateOptions) -> Result<MigrationReport> {
    if options.output.exists() && !options.force {
        return Err(MigrateError::OutputExists(options.output.clone()));
    }

    let documents = collect_markdown(&options.input, options.excluded_dir())?;
    let migrator = Migrator {
        root: &options.input,
        pipeline: options.pipeline(),
        write: false,
    };
    let outcomes = migrator.process_all(&documents)?;

    let app_config = options.input.join(&options.app_config);
    let existing = if app_config.is_file() {
        fs::read_to_string(&app_config)?
    } else {
        "{}".to_string()
    };
    let app_config_updated = patched_app_config(&existing, &app_config)?.is_some();

    Ok(build_report(options, outcomes, app_config_updated))
}

fn build_report(
    options: &MigrateOptions,
    mut outcomes: Vec<DocumentOutcome>,
    app_config_updated: bool,
) -> MigrationReport {
    outcomes.sort_by(|a, b| a.path.cmp(&b.path));

    let mut report = MigrationReport {
        input: options.input.clone(),
        output: options.output.clone(),
        dry_run: options.dry_run,
        files_processed: 0,
        files_changed: 0,
        app_config_updated,
        skipped: Vec::new(),
        moved: Vec::new(),
        changes: Vec::new(),
    };

    for outcome in outcomes {
        if let Some(from) = outcome.moved_from {
            report.moved.push(MovedFile {
                from,
                to: outcome.path.clone(),
            });
        }
        if outcome.skipped {
            report.skipped.push(outcome.path);
            continue;
        }
        report.files_processed += 1;
        if !outcome.changed.is_empty() {
            report.files_changed += 1;
            report.changes.push(FileChange {
                path: outcome.path,
                steps: outcome.changed,
            });
        }
    }

    report
}

/// Make sure the output path is free, removing it when forced.
fn prepare_output(output: &Path, force: bool) -> Result<()> {
    if !output.exists() {
        return Ok(());
    }
    if !force {
        return Err(MigrateError::OutputExists(output.to_path_buf()));
    }

    log::info!("removing existing {}", output.display());
    if output.is_dir() {
        fs::remove_dir_all(output)?;
    } else {
        fs::remove_file(output)?;
    }
    Ok(())
}

/// Recursively copy `from` into `to`, keeping file times and symlinks.
pub fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to)?;

    for entry in WalkDir::new(from).min_depth(1).follow_links(false) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| MigrateError::Other(e.to_string()))?;
        let destination = to.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&destination)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &destination)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &destination)?;
            let metadata = entry.metadata()?;
            let times = fs::FileTimes::new()
                .set_accessed(metadata.accessed()?)
                .set_modified(metadata.modified()?);
            // The copy may be read-only; the owner can still set times.
            fs::File::open(&destination)?.set_times(times)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, destination: &Path) -> Result<()> {
    let target = fs::read_link(link)?;
    std::os::unix::fs::symlink(target, destination)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, destination: &Path) -> Result<()> {
    if link.is_dir() {
        log::warn!("skipping directory symlink {}", link.display());
        return Ok(());
    }
    fs::copy(link, destination)?;
    Ok(())
}

fn remove_logseq_dir(root: &Path, logseq_dir: &str) -> Result<()> {
    let dir = root.join(logseq_dir);
    if dir.is_dir() {
        fs::remove_dir_all(&dir)?;
        log::debug!("removed {}", dir.display());
    } else {
        log::warn!("no {} directory in the graph", logseq_dir);
    }
    Ok(())
}

/// Markdown files under `root`, relative to it and sorted.
///
/// Symlinks are not followed. `excluded` names a top-level directory to
/// leave out, usually logseq's own.
pub fn collect_markdown(root: &Path, excluded: Option<&str>) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() == 1 && excluded.is_some_and(|dir| entry.file_name() == dir))
        });

    let mut documents = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if relative.to_string_lossy().contains(".md") {
            log::debug!("found {}", relative.display());
            documents.push(relative.to_path_buf());
        }
    }

    Ok(documents)
}
