//! # contract: shared data types, error types and the review interface
//!
//! Everything the pipeline stages pass between each other lives here, together
//! with the [`Reviewer`] trait that the CLI crate implements against the remote
//! review endpoint.
//!
//! ## Mocking & Testing
//! - [`Reviewer`] is annotated for `mockall`, so tests can script review
//!   responses without a network (`MockReviewer`).

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker stored for directories that have no entries.
pub const EMPTY_DIRECTORY: &str = "empty directory";

/// Loaded content for one path of the walked tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Full text of a regular file.
    File(String),
    /// A directory without any entries.
    EmptyDirectory,
}

impl Content {
    pub fn as_str(&self) -> &str {
        match self {
            Content::File(text) => text,
            Content::EmptyDirectory => EMPTY_DIRECTORY,
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path to content mapping produced by the loader. Unordered; sort before display.
pub type ContentMap = HashMap<PathBuf, Content>;

/// The directory walk could not complete.
#[derive(Debug, Error)]
#[error("failed to walk {}: {source}", display_path(.path))]
pub struct WalkError {
    pub path: Option<PathBuf>,
    #[source]
    pub source: walkdir::Error,
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

impl From<walkdir::Error> for WalkError {
    fn from(source: walkdir::Error) -> Self {
        WalkError {
            path: source.path().map(|p| p.to_path_buf()),
            source,
        }
    }
}

/// A single path could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to list directory {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no load permit for {}: {source}", .path.display())]
    Gate {
        path: PathBuf,
        source: tokio::sync::AcquireError,
    },
    #[error("load task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// The output file could not be written.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to close file {}: {source}", .path.display())]
    Close {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Any failure of the bundling pipeline.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Failures talking to the review service or saving its answer.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("the project bundle is empty, nothing to review")]
    EmptyBundle,
    #[error("unauthorized: you have provided an invalid CREV API key")]
    Unauthorized,
    #[error("review request failed with status code {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to send review request: {0}")]
    Transport(String),
    #[error("failed to decode review response: {0}")]
    Decode(String),
    #[error("failed to save review: {0}")]
    Save(#[from] WriteError),
}

/// Body sent to the review endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
}

/// Body returned by the review endpoint on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub review: String,
}

/// Sends a bundle off for review.
///
/// Implemented by the HTTP client in the CLI crate and by `MockReviewer` in tests.
/// Implementations must not retry.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Reviewer: Send + Sync {
    /// Submit one request and return the decoded review.
    async fn review(&self, request: ReviewRequest) -> Result<ReviewResponse, ReviewError>;
}
