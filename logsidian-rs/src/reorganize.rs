//! Path reorganization for namespaced pages.
//!
//! logseq flattens namespaced pages into single files, encoding the `/` of
//! `docker/gitops` as `%2F` (`pages/docker%2Fgitops.md`). Obsidian uses real
//! folders instead, so those files move to nested directories and their
//! relative links gain extra `../` segments.

use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Filename-safe stand-in for a path separator.
pub const ESCAPED_SLASH: &str = "%2F";

// `./x`, `../x`, `../../a/b.png` ...; ASCII word characters only.
static RELATIVE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.\.?/(?:[A-Za-z0-9_.\-]+/?)*[A-Za-z0-9_.\-]*").unwrap()
});

/// Where a file should live after migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reorganization {
    pub new_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<String>,
    pub should_move: bool,
}

/// Compute the nested path for a file whose name encodes folders.
pub fn reorganize_path(path: &str) -> Reorganization {
    if !path.contains(ESCAPED_SLASH) {
        return Reorganization {
            new_path: path.to_string(),
            target_dir: None,
            should_move: false,
        };
    }

    let new_path = path.replace(ESCAPED_SLASH, "/");
    let target_dir = new_path
        .rsplit_once('/')
        .map(|(dir, _)| dir.to_string())
        .unwrap_or_default();

    Reorganization {
        new_path,
        target_dir: Some(target_dir),
        should_move: true,
    }
}

/// Number of separators in a path.
fn depth(path: &str) -> usize {
    path.matches('/').count()
}

/// Prefix relative references so they still resolve from `new_path`.
///
/// Only moves to a deeper directory are adjusted. A move to a shallower
/// directory leaves the content as-is, since the prefix to strip depends
/// on the link and cannot be decided from the depth alone.
pub fn rewrite_relative_paths(content: &str, original_path: &str, new_path: &str) -> String {
    let old_depth = depth(original_path);
    let new_depth = depth(new_path);

    if new_depth <= old_depth {
        if new_depth < old_depth {
            log::debug!(
                "{} is shallower than {}, relative paths left as-is",
                new_path,
                original_path
            );
        }
        return content.to_string();
    }

    let prefix = "../".repeat(new_depth - old_depth);
    RELATIVE_REFERENCE
        .replace_all(content, |caps: &regex::Captures| format!("{}{}", prefix, &caps[0]))
        .into_owned()
}

/// Reorganize a file relative to the vault root.
///
/// Only the part below `root` is inspected, so an escaped slash in the
/// root's own name is never expanded.
pub fn reorganize_under(root: &Path, relative_path: &Path) -> Option<(PathBuf, PathBuf)> {
    let relative = to_slash(relative_path);
    let plan = reorganize_path(&relative);
    if !plan.should_move {
        return None;
    }
    let new_relative = PathBuf::from(&plan.new_path);
    let target_dir = root.join(plan.target_dir.unwrap_or_default());
    Some((new_relative, target_dir))
}

/// Render a relative path with `/` separators.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_escaped_slash() {
        assert_eq!(
            reorganize_path("docker%2Fgitops.md"),
            Reorganization {
                new_path: "docker/gitops.md".to_string(),
                target_dir: Some("docker".to_string()),
                should_move: true,
            }
        );
    }

    #[test]
    fn test_multiple_escaped_slashes() {
        assert_eq!(
            reorganize_path("infrastructure%2Fkubernetes%2Fhelm.md"),
            Reorganization {
                new_path: "infrastructure/kubernetes/helm.md".to_string(),
                target_dir: Some("infrastructure/kubernetes".to_string()),
                should_move: true,
            }
        );
    }

    #[test]
    fn test_escaped_slash_under_directory() {
        let plan = reorganize_path("out/pages/docker%2Fgitops.md");
        assert_eq!(plan.new_path, "out/pages/docker/gitops.md");
        assert_eq!(plan.target_dir.as_deref(), Some("out/pages/docker"));
        assert!(!plan.new_path.contains(ESCAPED_SLASH));
    }

    #[test]
    fn test_normal_path_unchanged() {
        assert_eq!(
            reorganize_path("normal-file.md"),
            Reorganization {
                new_path: "normal-file.md".to_string(),
                target_dir: None,
                should_move: false,
            }
        );
    }

    #[test]
    fn test_deeper_move_adds_parent_segments() {
        let input = "Check this ![image](../assets/foo.png) and [link](../docs/bar.md)";
        assert_eq!(
            rewrite_relative_paths(input, "/usr/foo/bar", "/usr/foo/bar/new"),
            "Check this ![image](../../assets/foo.png) and [link](../../docs/bar.md)"
        );
    }

    #[test]
    fn test_nested_namespace_example() {
        assert_eq!(
            rewrite_relative_paths("![a](../x.png)", "/a/b", "/a/b/c"),
            "![a](../../x.png)"
        );
    }

    #[test]
    fn test_same_depth_unchanged() {
        let input = "Check this ![image](../assets/foo.png)";
        assert_eq!(rewrite_relative_paths(input, "/usr/foo/bar", "/usr/foo/bar"), input);
    }

    #[test]
    fn test_multiple_references_on_a_line() {
        assert_eq!(
            rewrite_relative_paths("![img1](../a.png) and ![img2](../b.png)", "/usr/foo/bar", "/usr/foo/bar/new"),
            "![img1](../../a.png) and ![img2](../../b.png)"
        );
    }

    #[test]
    fn test_absolute_paths_untouched() {
        assert_eq!(
            rewrite_relative_paths("![abs](/assets/foo.png) and ![rel](../bar.png)", "/usr/foo/bar", "/usr/foo/bar/new"),
            "![abs](/assets/foo.png) and ![rel](../../bar.png)"
        );
    }

    #[test]
    fn test_two_levels_deeper() {
        assert_eq!(
            rewrite_relative_paths("![x](./local.png)", "pages/a%2Fb%2Fc.md", "pages/a/b/c.md"),
            "![x](../.././local.png)"
        );
    }

    #[test]
    fn test_shallower_move_unchanged() {
        let input = "![x](../../a.png)";
        assert_eq!(rewrite_relative_paths(input, "a/b/c.md", "a.md"), input);
    }

    #[test]
    fn test_reorganize_under_root() {
        let root = Path::new("/tmp/vault%2Fcopy");
        let (new_relative, target_dir) =
            reorganize_under(root, Path::new("pages/docker%2Fgitops.md")).unwrap();
        assert_eq!(new_relative, PathBuf::from("pages/docker/gitops.md"));
        assert_eq!(target_dir, PathBuf::from("/tmp/vault%2Fcopy/pages/docker"));

        assert!(reorganize_under(root, Path::new("pages/plain.md")).is_none());
    }
}
