//! Page properties to YAML frontmatter.
//!
//! logseq keeps page metadata as `key:: value` lines at the top of a page.
//! They become an Obsidian frontmatter block, with `[[links]]` in values
//! flattened to plain text.

use regex::Regex;
use std::sync::LazyLock;

/// Separator between a property key and its value.
pub const PROPERTY_SEPARATOR: &str = "::";

static WIKILINK_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").unwrap());

/// A single `key:: value` page property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: String,
}

impl Property {
    /// Parse a property line, splitting on the first separator.
    pub fn parse(line: &str) -> Option<Self> {
        let (key, value) = line.split_once(PROPERTY_SEPARATOR)?;
        Some(Self {
            key: key.trim().to_string(),
            value: WIKILINK_WRAPPER
                .replace_all(value.trim(), "$1")
                .into_owned(),
        })
    }

    /// Format as a frontmatter line.
    pub fn to_frontmatter_line(&self) -> String {
        format!("{}: {}", self.key, self.value)
    }
}

/// Split the leading property block from the rest of the page.
///
/// Blank lines before and between properties are dropped. The first line
/// without a separator starts the content.
pub fn split_page_properties(text: &str) -> (Vec<Property>, Vec<&str>) {
    let mut properties = Vec::new();
    let mut content = Vec::new();
    let mut in_properties = true;

    for line in text.split('\n') {
        if in_properties {
            if line.trim().is_empty() {
                continue;
            }
            match Property::parse(line) {
                Some(property) => {
                    properties.push(property);
                    continue;
                }
                None => in_properties = false,
            }
        }
        content.push(line);
    }

    (properties, content)
}

/// Hoist leading page properties into a frontmatter block.
///
/// Pages without properties are returned unchanged.
pub fn rewrite_page_properties(text: &str) -> String {
    let (properties, content) = split_page_properties(text);

    if properties.is_empty() {
        return text.to_string();
    }

    let header: Vec<String> = properties.iter().map(Property::to_frontmatter_line).collect();
    format!("---\n{}\n---\n\n{}", header.join("\n"), content.join("\n"))
}
