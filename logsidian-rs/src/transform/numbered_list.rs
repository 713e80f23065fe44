//! Numbered list rewriting.
//!
//! logseq stores ordered lists as regular bullets followed by a
//! `logseq.order-list-type:: number` property line. Obsidian wants `1.`, `2.`.

use regex::Regex;
use std::sync::LazyLock;

/// Property line logseq writes under every numbered bullet.
pub const NUMBERING_ANNOTATION: &str = "logseq.order-list-type:: number";

static LEADING_DASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)-").unwrap());

/// Rewrite annotated bullets into an ordered list and drop the annotations.
///
/// Each run of consecutive annotated bullets is numbered from 1. Any other
/// line (including an unannotated bullet) ends the run.
pub fn rewrite_numbered_lists(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let (_, out) = lines.iter().enumerate().fold(
        (0usize, Vec::with_capacity(lines.len())),
        |(counter, mut out), (i, line)| {
            if is_annotation(line) {
                return (counter, out);
            }

            let is_bullet = line.trim_start().starts_with('-');
            let is_numbered = lines.get(i + 1).is_some_and(|next| is_annotation(next));

            if is_bullet && is_numbered {
                let counter = counter + 1;
                let replacement = format!("${{1}}{}.", counter);
                out.push(LEADING_DASH.replace(line, replacement.as_str()).into_owned());
                (counter, out)
            } else {
                out.push(line.to_string());
                (0, out)
            }
        },
    );

    out.join("\n")
}

fn is_annotation(line: &str) -> bool {
    line.contains(NUMBERING_ANNOTATION)
}
