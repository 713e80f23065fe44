//! Task marker rewriting (`- TODO` -> `- [ ]`).
//!
//! Scheduling syntax such as `DEADLINE: <2022-11-08 Tue 15:00>` is left as-is.

/// logseq status marker and its Obsidian checkbox.
const MARKERS: [(&str, &str); 3] = [
    ("- TODO", "- [ ]"),
    ("- DOING", "- [ ]"),
    ("- DONE", "- [x]"),
];

/// Rewrite logseq task keywords into markdown checkboxes.
///
/// Indentation is untouched since the marker sits right after the dash.
pub fn rewrite_task_markers(text: &str) -> String {
    MARKERS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_todo() {
        assert_eq!(rewrite_task_markers("- TODO foo bar"), "- [ ] foo bar");
    }

    #[test]
    fn test_single_doing() {
        assert_eq!(rewrite_task_markers("- DOING foo bar"), "- [ ] foo bar");
    }

    #[test]
    fn test_single_done() {
        assert_eq!(rewrite_task_markers("- DONE foo bar"), "- [x] foo bar");
    }

    #[test]
    fn test_mixed_statuses() {
        let input = "\n      - DONE foo\n      - TODO bar\n      - DONE baz\n      - DOING rop\n    ";
        let want = "\n      - [x] foo\n      - [ ] bar\n      - [x] baz\n      - [ ] rop\n    ";
        assert_eq!(rewrite_task_markers(input), want);
    }

    #[test]
    fn test_nested_statuses() {
        let input = "- DONE foo\n  - TODO bar\n    - DONE baz\n  - DOING rop";
        let want = "- [x] foo\n  - [ ] bar\n    - [x] baz\n  - [ ] rop";
        assert_eq!(rewrite_task_markers(input), want);
    }

    #[test]
    fn test_keyword_without_dash_is_kept() {
        let text = "TODO: write more tests";
        assert_eq!(rewrite_task_markers(text), text);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "- TODO a\n- DOING b\n- DONE c",
            "- [ ] already\n- [x] converted",
            "",
            "plain text",
        ];
        for input in inputs {
            let once = rewrite_task_markers(input);
            assert_eq!(rewrite_task_markers(&once), once);
        }
    }
}
