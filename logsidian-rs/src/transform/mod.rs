//! Text rewrites from logseq markdown to Obsidian markdown.
//!
//! Every function here is total: any input, including malformed markdown,
//! produces an output string.

pub mod filters;
pub mod numbered_list;
pub mod page_properties;
pub mod pipeline;
pub mod tag_link;
pub mod task_marker;

pub use filters::{remove_collapsed_blocks, remove_logbooks};
pub use numbered_list::rewrite_numbered_lists;
pub use page_properties::{rewrite_page_properties, split_page_properties, Property};
pub use pipeline::{Pipeline, PipelineOutput, Step};
pub use tag_link::rewrite_tag_links;
pub use task_marker::rewrite_task_markers;
