//! The fixed per-document rewrite pipeline.

use crate::transform::{
    remove_collapsed_blocks, remove_logbooks, rewrite_numbered_lists, rewrite_page_properties,
    rewrite_tag_links, rewrite_task_markers,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single migration step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// Move `a%2Fb.md` to `a/b.md` and fix relative links.
    Reorganize,
    TaskMarkers,
    TagLinks,
    NumberedLists,
    PageProperties,
    CollapsedBlocks,
    Logbooks,
}

impl Step {
    /// Text steps in the order they run.
    pub const TEXT_STEPS: [Step; 6] = [
        Step::TaskMarkers,
        Step::TagLinks,
        Step::NumberedLists,
        Step::PageProperties,
        Step::CollapsedBlocks,
        Step::Logbooks,
    ];

    /// Kebab-case name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Step::Reorganize => "reorganize",
            Step::TaskMarkers => "task-markers",
            Step::TagLinks => "tag-links",
            Step::NumberedLists => "numbered-lists",
            Step::PageProperties => "page-properties",
            Step::CollapsedBlocks => "collapsed-blocks",
            Step::Logbooks => "logbooks",
        }
    }

    /// Human description used in log lines.
    pub fn describe(self) -> &'static str {
        match self {
            Step::Reorganize => "updated relative paths",
            Step::TaskMarkers => "updated TODOs",
            Step::TagLinks => "updated links",
            Step::NumberedLists => "updated numbered lists",
            Step::PageProperties => "updated page properties",
            Step::CollapsedBlocks => "removed collapsed blocks",
            Step::Logbooks => "removed logbooks",
        }
    }

    /// Apply a text step.
    ///
    /// Returns `None` for `Reorganize`, which needs the document's old and
    /// new paths and is applied by the migrator instead.
    pub fn apply(self, text: &str) -> Option<String> {
        let rewritten = match self {
            Step::Reorganize => return None,
            Step::TaskMarkers => rewrite_task_markers(text),
            Step::TagLinks => rewrite_tag_links(text),
            Step::NumberedLists => rewrite_numbered_lists(text),
            Step::PageProperties => rewrite_page_properties(text),
            Step::CollapsedBlocks => remove_collapsed_blocks(text),
            Step::Logbooks => remove_logbooks(text),
        };
        Some(rewritten)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of running the pipeline over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub text: String,
    /// Steps whose output differed from their input, in run order.
    pub changed: Vec<Step>,
}

/// The text pipeline with an optional set of disabled steps.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    skip: BTreeSet<Step>,
}

impl Pipeline {
    /// Pipeline with every step enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline with the given steps disabled.
    pub fn with_skipped(skip: impl IntoIterator<Item = Step>) -> Self {
        Self {
            skip: skip.into_iter().collect(),
        }
    }

    pub fn is_enabled(&self, step: Step) -> bool {
        !self.skip.contains(&step)
    }

    /// Run every enabled text step in order.
    pub fn run(&self, text: &str) -> PipelineOutput {
        let mut current = text.to_string();
        let mut changed = Vec::new();

        for step in Step::TEXT_STEPS {
            if !self.is_enabled(step) {
                continue;
            }
            let Some(next) = step.apply(&current) else {
                continue;
            };
            if next != current {
                changed.push(step);
            }
            current = next;
        }

        PipelineOutput {
            text: current,
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = "tags:: [[project]], [[infra]]
status:: active

- DONE migrate the #homelab
  :LOGBOOK:
  CLOCK: [2023-04-01 Sat 10:00:00]--[2023-04-01 Sat 11:00:00] =>  01:00:00
  :END:
- TODO steps
  collapsed:: true
	- first
	  logseq.order-list-type:: number
	- second
	  logseq.order-list-type:: number
";

    #[test]
    fn test_full_pipeline() {
        let out = Pipeline::new().run(PAGE);
        let want = "---
tags: project, infra
status: active
---

- [x] migrate the [[homelab]]
- [ ] steps
\t1. first
\t2. second
";
        assert_eq!(out.text, want);
        assert_eq!(
            out.changed,
            vec![
                Step::TaskMarkers,
                Step::TagLinks,
                Step::NumberedLists,
                Step::PageProperties,
                Step::CollapsedBlocks,
                Step::Logbooks,
            ]
        );
    }

    #[test]
    fn test_skipped_steps_do_not_run() {
        let pipeline = Pipeline::with_skipped([Step::PageProperties, Step::TagLinks]);
        let out = pipeline.run(PAGE);
        assert!(out.text.starts_with("tags:: [[project]], [[infra]]"));
        assert!(out.text.contains("#homelab"));
        assert!(!out.changed.contains(&Step::PageProperties));
        assert!(!out.changed.contains(&Step::TagLinks));
    }

    #[test]
    fn test_apply_text_steps_only() {
        assert_eq!(Step::Reorganize.apply("![a](../a.png)"), None);
        assert_eq!(
            Step::TaskMarkers.apply("- TODO a").as_deref(),
            Some("- [ ] a")
        );
        assert!(Step::TEXT_STEPS.iter().all(|step| step.apply("").is_some()));
    }

    #[test]
    fn test_unchanged_document() {
        let text = "# Obsidian already\n\n- [ ] nothing to do";
        let out = Pipeline::new().run(text);
        assert_eq!(out.text, text);
        assert!(out.changed.is_empty());
    }

    #[test]
    fn test_step_names_round_trip_through_serde() {
        let steps: Vec<Step> = serde_json::from_str(r#"["page-properties", "logbooks"]"#).unwrap();
        assert_eq!(steps, vec![Step::PageProperties, Step::Logbooks]);
        assert_eq!(Step::CollapsedBlocks.to_string(), "collapsed-blocks");
    }
}
