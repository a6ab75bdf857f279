//! Bundle composition: the tree diagram plus every loaded content entry.
//!
//! [`build_bundle`] is the full pipeline used by the CLI:
//!   - walk the root with the configured [`PathFilter`](crate::filter::PathFilter)
//!   - render the tree diagram
//!   - load file contents concurrently
//!   - compose the final text, ordered by path so identical trees give identical bytes
//!
//! Errors from any stage are returned as [`BundleError`]; nothing is written here.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::config::BundleConfig;
use crate::contract::{BundleError, ContentMap};
use crate::load::load_contents;
use crate::render::render_tree;
use crate::walk::walk;

/// Heading that opens every bundle.
pub const BUNDLE_HEADER: &str = "Project Directory Structure:";

/// A composed bundle and some numbers about it.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub text: String,
    pub summary: BundleSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    /// Paths retained by the walk.
    pub paths: usize,
    /// Files and empty directories with a content block.
    pub entries: usize,
    pub bytes: usize,
    /// Rough token range, `(low, high)`.
    pub estimated_tokens: (usize, usize),
    /// Hex SHA-256 of the bundle text.
    pub digest: String,
}

/// Run the whole pipeline for `config`.
pub async fn build_bundle(config: &BundleConfig) -> Result<Bundle, BundleError> {
    config.trace_loaded();

    let paths = walk(&config.root, &config.filter)?;
    let tree = render_tree(&paths);
    let contents = load_contents(&paths, config.max_concurrency).await?;
    let text = compose_bundle(&tree, &contents);

    let summary = BundleSummary {
        paths: paths.len(),
        entries: contents.len(),
        bytes: text.len(),
        estimated_tokens: estimate_tokens(&text),
        digest: digest(&text),
    };
    info!(
        paths = summary.paths,
        entries = summary.entries,
        bytes = summary.bytes,
        digest = %summary.digest,
        "Composed bundle"
    );
    Ok(Bundle { text, summary })
}

/// Concatenate the header, `tree` and every content entry sorted by path.
pub fn compose_bundle(tree: &str, contents: &ContentMap) -> String {
    let mut keys: Vec<&Path> = contents.keys().map(|p| p.as_path()).collect();
    keys.sort();
    debug!(entries = keys.len(), "Composing bundle");

    let mut bundle = String::new();
    bundle.push_str(BUNDLE_HEADER);
    bundle.push('\n');
    bundle.push_str(tree);
    bundle.push_str("\n\n");

    for path in keys {
        let content = &contents[path];
        bundle.push_str("File: \n");
        bundle.push_str(&path.to_string_lossy());
        bundle.push('\n');
        bundle.push_str("Content: \n");
        bundle.push_str(content.as_str());
        bundle.push_str("\n\n");
    }
    bundle
}

/// Token count estimate between one token per four and one per three bytes.
pub fn estimate_tokens(text: &str) -> (usize, usize) {
    (text.len() / 4, text.len() / 3)
}

fn digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
