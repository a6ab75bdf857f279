//! Concurrent content loading for a walked path set.
//!
//! Scatter-gather: one tokio task per path, each holding a semaphore permit
//! while it touches the filesystem. The caller waits for every task, then either
//! gets the complete [`ContentMap`] or the first error any task reported. Tasks
//! are never cancelled because a sibling failed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::{debug, error, trace};

use crate::contract::{Content, ContentMap, LoadError};

/// Load the content of every path with at most `max_concurrency` operations in flight.
///
/// Files map to their text, empty directories to [`Content::EmptyDirectory`];
/// non-empty directories are left out. A `max_concurrency` of zero is treated as one.
pub async fn load_contents(
    paths: &[PathBuf],
    max_concurrency: usize,
) -> Result<ContentMap, LoadError> {
    let permits = max_concurrency.max(1);
    let gate = Arc::new(Semaphore::new(permits));
    debug!(paths = paths.len(), permits, "Loading contents");

    let mut pending: FuturesUnordered<_> = paths
        .iter()
        .cloned()
        .map(|path| {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                let content = load_gated(&path, gate).await?;
                Ok::<_, LoadError>((path, content))
            })
        })
        .collect();

    let mut contents = ContentMap::with_capacity(paths.len());
    let mut first_error: Option<LoadError> = None;

    while let Some(joined) = pending.next().await {
        let outcome = joined.map_err(LoadError::from).and_then(|result| result);
        match outcome {
            Ok((path, Some(content))) => {
                contents.insert(path, content);
            }
            Ok((_, None)) => {}
            Err(e) => {
                error!(error = %e, "Failed to load path");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => {
            debug!(entries = contents.len(), "Loaded contents");
            Ok(contents)
        }
    }
}

/// Load one path while holding a permit from `gate`.
///
/// A closed gate is an error; the path is never touched without a permit.
pub async fn load_gated(path: &Path, gate: Arc<Semaphore>) -> Result<Option<Content>, LoadError> {
    let _permit = gate.acquire_owned().await.map_err(|source| {
        error!(path = %path.display(), "Concurrency gate closed");
        LoadError::Gate {
            path: path.to_path_buf(),
            source,
        }
    })?;
    load_entry(path).await
}

/// Stat one path and load what it holds. `None` for directories with entries.
pub async fn load_entry(path: &Path) -> Result<Option<Content>, LoadError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| LoadError::Stat {
            path: path.to_path_buf(),
            source,
        })?;

    if !metadata.is_dir() {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        trace!(path = %path.display(), size = bytes.len(), "Read file");
        return Ok(Some(Content::File(
            String::from_utf8_lossy(&bytes).into_owned(),
        )));
    }

    let list_err = |source| LoadError::ListDir {
        path: path.to_path_buf(),
        source,
    };
    let mut entries = tokio::fs::read_dir(path).await.map_err(list_err)?;
    let first = entries.next_entry().await.map_err(list_err)?;
    if first.is_none() {
        trace!(path = %path.display(), "Found empty directory");
        Ok(Some(Content::EmptyDirectory))
    } else {
        Ok(None)
    }
}
