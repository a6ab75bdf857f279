//! Directory traversal: collect every retained path below a root.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::contract::WalkError;
use crate::filter::PathFilter;

/// Walk `root` in pre-order and return all retained paths, root excluded.
///
/// Excluded directories are pruned without being read. Any traversal error
/// aborts the walk; there is no partial result.
pub fn walk(root: &Path, filter: &PathFilter) -> Result<Vec<PathBuf>, WalkError> {
    debug!(root = %root.display(), "Walking project tree");

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| is_retained(root, entry, filter));

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry?;
        trace!(path = %entry.path().display(), "Retained path");
        paths.push(clean(entry.path()));
    }

    debug!(count = paths.len(), root = %root.display(), "Finished walking project tree");
    Ok(paths)
}

fn is_retained(root: &Path, entry: &DirEntry, filter: &PathFilter) -> bool {
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    let retained = filter.should_retain(relative, is_dir(entry));
    if !retained {
        debug!(path = %entry.path().display(), "Skipping filtered path");
    }
    retained
}

/// Directory test shared with the loader: symlinks count as what they point at.
///
/// Linked directories are not descended into, but they are still filtered and
/// loaded as directories.
fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

/// Drop `.` components so walking `.` yields `src/lib.rs` rather than `./src/lib.rs`.
pub fn clean(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
