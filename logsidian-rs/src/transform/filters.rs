//! Line filters for logseq-only annotations.

/// Property logseq adds to folded blocks.
pub const COLLAPSED_MARKER: &str = "collapsed:: true";

/// Opens a logbook drawer.
pub const LOGBOOK_OPEN: &str = ":LOGBOOK:";

/// Closes a logbook drawer.
pub const LOGBOOK_CLOSE: &str = ":END:";

/// Drop every `collapsed:: true` line.
pub fn remove_collapsed_blocks(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.contains(COLLAPSED_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop `:LOGBOOK:` ... `:END:` drawers, markers included.
///
/// A stray `:END:` outside a drawer is kept.
pub fn remove_logbooks(text: &str) -> String {
    let mut in_logbook = false;
    let mut kept = Vec::new();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed == LOGBOOK_OPEN {
            in_logbook = true;
            continue;
        }
        if trimmed == LOGBOOK_CLOSE && in_logbook {
            in_logbook = false;
            continue;
        }
        if !in_logbook {
            kept.push(line);
        }
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_collapsed_blocks() {
        let input = "- TODO foo bar";
        assert_eq!(remove_collapsed_blocks(input), input);
    }

    #[test]
    fn test_collapsed_line_is_removed() {
        let input = "\n- TODO foo bar\n  - another line\n  collapsed:: true\n  -last line";
        let want = "\n- TODO foo bar\n  - another line\n  -last line";
        assert_eq!(remove_collapsed_blocks(input), want);
    }

    #[test]
    fn test_collapsed_false_is_kept() {
        let input = "- item\n  collapsed:: false";
        assert_eq!(remove_collapsed_blocks(input), input);
    }

    #[test]
    fn test_logbook_is_removed() {
        let input = "- DONE ship it
  :LOGBOOK:
  CLOCK: [2023-04-01 Sat 10:00:00]--[2023-04-01 Sat 11:00:00] =>  01:00:00
  :END:
- next";
        assert_eq!(remove_logbooks(input), "- DONE ship it\n- next");
    }

    #[test]
    fn test_multiple_logbooks() {
        let input = "a\n:LOGBOOK:\nx\n:END:\nb\n  :LOGBOOK:\n  y\n  :END:\nc";
        assert_eq!(remove_logbooks(input), "a\nb\nc");
    }

    #[test]
    fn test_stray_end_is_kept() {
        let input = "a\n:END:\nb";
        assert_eq!(remove_logbooks(input), input);
    }

    #[test]
    fn test_unclosed_logbook_drops_rest() {
        let input = "a\n:LOGBOOK:\nCLOCK: x\nb";
        assert_eq!(remove_logbooks(input), "a");
    }

    #[test]
    fn test_marker_inside_text_is_kept() {
        let input = "the :LOGBOOK: drawer";
        assert_eq!(remove_logbooks(input), input);
    }
}
