//! Path retention rules for the tree walk.
//!
//! A path is dropped when an ignore prefix matches the whole path string or the
//! start of any one of its components, when it is a file with an ignored
//! extension, or when include extensions are given and it is a file matching
//! none of them. Directories are only ever dropped by prefix rules.
//!
//! Paths handed to the filter are expected to be relative to the walk root, so
//! a rule like `.` hits dot-files inside the project but not a dot-directory
//! the project itself happens to live in.

use std::borrow::Cow;
use std::path::{Component, Path};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathFilter {
    ignore_prefixes: Vec<String>,
    include_extensions: Vec<String>,
    ignore_extensions: Vec<String>,
}

impl PathFilter {
    /// Build a filter; rules are trimmed and blank ones discarded.
    pub fn new(
        ignore_prefixes: Vec<String>,
        include_extensions: Vec<String>,
        ignore_extensions: Vec<String>,
    ) -> Self {
        Self {
            ignore_prefixes: clean_rules(ignore_prefixes),
            include_extensions: clean_rules(include_extensions),
            ignore_extensions: clean_rules(ignore_extensions),
        }
    }

    pub fn ignore_prefixes(&self) -> &[String] {
        &self.ignore_prefixes
    }

    pub fn include_extensions(&self) -> &[String] {
        &self.include_extensions
    }

    pub fn ignore_extensions(&self) -> &[String] {
        &self.ignore_extensions
    }

    pub fn should_retain(&self, path: &Path, is_dir: bool) -> bool {
        should_retain(
            path,
            is_dir,
            &self.ignore_prefixes,
            &self.include_extensions,
            &self.ignore_extensions,
        )
    }
}

fn clean_rules(rules: Vec<String>) -> Vec<String> {
    rules
        .into_iter()
        .map(|rule| rule.trim().to_string())
        .filter(|rule| !rule.is_empty())
        .collect()
}

/// Decide whether `path` survives the given rules.
pub fn should_retain<S: AsRef<str>>(
    path: &Path,
    is_dir: bool,
    ignore_prefixes: &[S],
    include_extensions: &[S],
    ignore_extensions: &[S],
) -> bool {
    if ignore_prefixes
        .iter()
        .any(|prefix| matches_prefix(path, prefix.as_ref()))
    {
        return false;
    }
    if is_dir {
        return true;
    }

    let extension = extension_of(path);
    let has_extension = |rules: &[S]| match extension.as_deref() {
        Some(ext) => rules.iter().any(|rule| rule.as_ref() == ext),
        None => false,
    };

    if has_extension(ignore_extensions) {
        return false;
    }
    include_extensions.is_empty() || has_extension(include_extensions)
}

fn matches_prefix(path: &Path, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    if path.to_string_lossy().starts_with(prefix) {
        return true;
    }
    path.components().any(|component| match component {
        Component::Normal(name) => name.to_string_lossy().starts_with(prefix),
        _ => false,
    })
}

/// Suffix of the final component from its last `.`, e.g. `.rs` or `.gitignore`.
///
/// Names that are not valid UTF-8 are read lossily, so `logo\xff.png` still ends in `.png`.
pub fn extension_of(path: &Path) -> Option<Cow<'_, str>> {
    match path.file_name()?.to_string_lossy() {
        Cow::Borrowed(name) => name.rfind('.').map(|idx| Cow::Borrowed(&name[idx..])),
        Cow::Owned(name) => name.rfind('.').map(|idx| Cow::Owned(name[idx..].to_string())),
    }
}
