//! Error types for the download module.

use std::fmt;

use thiserror::Error;

use crate::api::ApiError;

/// Which of the two upstream calls of a download failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStage {
    /// Obtaining the direct download URL.
    Link,
    /// Fetching the bytes behind the direct URL.
    Content,
}

impl fmt::Display for ResolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link => f.write_str("download link"),
            Self::Content => f.write_str("file content"),
        }
    }
}

/// A single file download failed.
#[derive(Debug, Clone, Error)]
#[error("failed to fetch {stage} for {path}: {source}")]
pub struct ResolveError {
    /// Resource path that failed.
    pub path: String,
    /// Step that failed.
    pub stage: ResolveStage,
    /// Underlying upstream error.
    #[source]
    pub source: ApiError,
}

impl ResolveError {
    /// Creates a resolve error for `path` at `stage`.
    pub fn new(path: impl Into<String>, stage: ResolveStage, source: ApiError) -> Self {
        Self {
            path: path.into(),
            stage,
            source,
        }
    }
}

/// Errors that abort building an archive as a whole.
///
/// Individual file failures are never reported here; they become
/// warnings on the archive result.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Invalid concurrency value provided.
    #[error("invalid archive concurrency {value}: must be between 1 and 32")]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Semaphore was closed unexpectedly.
    #[error("download semaphore closed unexpectedly")]
    SemaphoreClosed,

    /// The zip writer failed.
    #[error("archive write failed for entry {entry}: {source}")]
    Write {
        /// Entry being written when the failure happened.
        entry: String,
        /// Underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },

    /// The archive could not be finalized.
    #[error("archive finalization failed: {source}")]
    Finish {
        /// Underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },
}
