//! Tag to wikilink rewriting (`#tag` -> `[[tag]]`).
//!
//! logseq treats `#tag`, `#[[tag]]` and `[[tag]]` as page references, while
//! Obsidian only links pages through `[[tag]]`. The scanner below is a
//! character-level heuristic, not a markdown parser. Known false positives:
//!
//! - `#k8s/#helm` becomes `[[k8s/#helm]]`
//! - `(#k8s or #helm) ` becomes `(#k8s or [[helm)]] `
//!
//! A tag that runs into the end of the input is left unclosed.

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Copying text through untouched.
    Normal,
    /// Inside a tag whose `[[` has already been emitted.
    InTag,
}

/// What to do with a `#` in normal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HashAction {
    /// Keep the `#` as-is.
    Literal,
    /// Drop the `#`, the tag is already in `#[[tag]]` form.
    Drop,
    /// Replace the `#` with `[[` and start a tag.
    Open,
}

/// Rewrite logseq hashtags into Obsidian wikilinks.
pub fn rewrite_tag_links(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut state = State::Normal;

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();

        if c == '#' {
            match classify_hash(prev, next, chars.get(i + 2).copied()) {
                HashAction::Literal => out.push(c),
                HashAction::Drop => {}
                HashAction::Open => {
                    if state == State::Normal {
                        out.push_str("[[");
                        state = State::InTag;
                    }
                }
            }
            continue;
        }

        match state {
            State::Normal => out.push(c),
            State::InTag => {
                if !ends_tag(c) || continues_tag(c, next) {
                    out.push(c);
                } else {
                    out.push_str("]]");
                    out.push(c);
                    state = State::Normal;
                }
            }
        }
    }

    out
}

fn classify_hash(prev: Option<char>, next: Option<char>, after_next: Option<char>) -> HashAction {
    // Glued to the previous word: most likely a URL fragment.
    if prev.is_some_and(|p| p != ' ') {
        return HashAction::Literal;
    }

    // Heading syntax.
    if matches!(next, Some('#') | Some(' ')) {
        return HashAction::Literal;
    }

    // logseq query.
    if next == Some('+') {
        return HashAction::Literal;
    }

    if next == Some('[') && after_next == Some('[') {
        return HashAction::Drop;
    }

    HashAction::Open
}

/// Characters that close a tag.
fn ends_tag(c: char) -> bool {
    matches!(
        c,
        ' ' | '\n' | '\t' | ',' | '.' | ';' | ':' | '?' | '!' | '/' | '\\'
    )
}

/// `.` and `/` keep the tag open unless a space follows (`#google.com`, `#foo/bar`).
fn continues_tag(c: char, next: Option<char>) -> bool {
    matches!(c, '.' | '/') && next != Some(' ')
}
