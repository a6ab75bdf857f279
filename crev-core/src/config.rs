use std::path::PathBuf;

use tracing::{debug, info};

use crate::filter::PathFilter;

/// Default bound on simultaneous filesystem operations while loading contents.
pub const DEFAULT_MAX_CONCURRENCY: usize = 100;

/// File the bundle is written to, relative to the working directory.
pub const BUNDLE_FILE: &str = "crev-project.txt";

/// File the review is written to, relative to the working directory.
pub const REVIEW_FILE: &str = "crev-review.md";

/// Prefixes that are always ignored on top of the user's own.
pub const STANDARD_PREFIXES_TO_IGNORE: &[&str] = &[
    // .git, .idea, .vscode, ...
    ".",
    // crev's own output files
    "crev",
    // go.mod, go.sum
    "go",
    "license",
    "readme",
    "README",
    // poetry
    "pyproject.toml",
    "poetry.lock",
    "venv",
    // build output
    "build",
    "dist",
    "out",
    "target",
    "bin",
    // javascript
    "node_modules",
    "coverage",
    "public",
    "static",
    "Thumbs.db",
    "package",
    "yarn.lock",
    "tsconfig",
    // next.js
    "next.config",
    "next-env",
    // python
    "__pycache__",
    "logs",
    // java
    "gradle",
    // c++
    "CMakeLists",
    // ruby
    "vendor",
    "Gemfile",
    // php
    "composer",
    // tailwind
    "tailwind",
    "postcss",
];

/// Binary and asset extensions that are always ignored.
pub const STANDARD_EXTENSIONS_TO_IGNORE: &[&str] = &[
    ".jpeg", ".jpg", ".png", ".gif", ".pdf", ".svg", ".ico", ".woff", ".woff2", ".eot", ".ttf",
    ".otf",
];

/// Everything one bundling run needs. Built once by the caller and passed down.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    pub root: PathBuf,
    pub filter: PathFilter,
    pub max_concurrency: usize,
}

impl BundleConfig {
    pub fn new(root: impl Into<PathBuf>, filter: PathFilter) -> Self {
        Self {
            root: root.into(),
            filter,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Config for the CLI: the user's rules extended with the standard ignore lists.
    pub fn with_standard_ignores(
        root: impl Into<PathBuf>,
        ignore_prefixes: Vec<String>,
        include_extensions: Vec<String>,
        ignore_extensions: Vec<String>,
    ) -> Self {
        let mut prefixes = ignore_prefixes;
        prefixes.extend(STANDARD_PREFIXES_TO_IGNORE.iter().map(|p| p.to_string()));
        let mut excluded = ignore_extensions;
        excluded.extend(STANDARD_EXTENSIONS_TO_IGNORE.iter().map(|e| e.to_string()));
        Self::new(root, PathFilter::new(prefixes, include_extensions, excluded))
    }

    pub fn trace_loaded(&self) {
        info!(
            root = %self.root.display(),
            max_concurrency = self.max_concurrency,
            ignore_prefixes = self.filter.ignore_prefixes().len(),
            include_extensions = self.filter.include_extensions().len(),
            ignore_extensions = self.filter.ignore_extensions().len(),
            "Loaded BundleConfig"
        );
        debug!(?self, "BundleConfig loaded (full debug)");
    }
}
