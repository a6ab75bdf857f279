//! Box-drawing tree diagram for a path set.

use std::path::{Path, PathBuf};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const BLANK: &str = "    ";

/// Render `paths` as a tree, one line per path.
///
/// Paths are sorted first (component-wise, so children always follow their
/// parent directly). The depth of a path is its separator count, so the output
/// only depends on the path strings and never touches the filesystem.
pub fn render_tree(paths: &[PathBuf]) -> String {
    let mut sorted: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
    sorted.sort();
    sorted.dedup();

    let depths: Vec<usize> = sorted.iter().map(|p| depth(p)).collect();
    let mut level_prefix: Vec<&'static str> = Vec::new();
    let mut tree = String::new();

    for (i, path) in sorted.iter().enumerate() {
        let level = depths[i];
        if level_prefix.len() <= level {
            level_prefix.resize(level + 1, "");
        }
        for prefix in &level_prefix[..level] {
            tree.push_str(prefix);
        }

        if is_last_at_level(&depths, i) {
            tree.push_str(LAST_BRANCH);
            level_prefix[level] = BLANK;
        } else {
            tree.push_str(BRANCH);
            level_prefix[level] = CONTINUATION;
        }
        tree.push_str(&basename(path));
        tree.push('\n');
    }
    tree
}

/// Number of separators in the path, e.g. `cmd/main.go` is at depth 1.
pub fn depth(path: &Path) -> usize {
    path.components().count().saturating_sub(1)
}

/// True when no later sibling follows before the listing climbs above this level.
fn is_last_at_level(depths: &[usize], i: usize) -> bool {
    let level = depths[i];
    for &next in &depths[i + 1..] {
        if next < level {
            return true;
        }
        if next == level {
            return false;
        }
    }
    true
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
