//! logsidian - migrate a logseq graph into an Obsidian vault.
//!
//! # Overview
//!
//! The graph is copied to a new directory and every markdown page in the
//! copy is rewritten from logseq's dialect to Obsidian's:
//! - `- TODO` / `- DOING` / `- DONE` become checkboxes
//! - `#tag` and `#[[tag]]` become `[[tag]]`
//! - annotated bullets become numbered lists
//! - leading `key:: value` page properties become YAML frontmatter
//! - `collapsed:: true` lines and `:LOGBOOK:` drawers are dropped
//! - namespaced pages (`docker%2Fgitops.md`) move into folders, with their
//!   relative links adjusted
//!
//! Finally `.obsidian/app.json` is pointed at logseq's folder layout.
//!
//! # Example
//!
//! ```
//! use logsidian::transform::Pipeline;
//!
//! let out = Pipeline::new().run("- TODO read about #rust\n");
//! assert_eq!(out.text, "- [ ] read about [[rust]]\n");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod migrate;
pub mod obsidian;
pub mod reorganize;
pub mod transform;

// Re-export main types at crate root
pub use config::Config;
pub use error::{MigrateError, Result};
pub use migrate::{migrate, MigrateOptions, MigrationReport};
pub use reorganize::{reorganize_path, rewrite_relative_paths, Reorganization};
pub use transform::{
    remove_collapsed_blocks, remove_logbooks, rewrite_numbered_lists, rewrite_page_properties,
    rewrite_tag_links, rewrite_task_markers, Pipeline, Step,
};
