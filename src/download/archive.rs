//! Bundles several files of a public resource into one in-memory zip.
//!
//! # Concurrency Model
//!
//! - Each path is resolved in its own Tokio task
//! - A semaphore permit is acquired before spawning each task, bounding the
//!   number of in-flight upstream downloads across all bundles
//! - Results are joined in input order, so entries and warnings are
//!   deterministic regardless of completion order
//!
//! # Failure Policy
//!
//! A path that fails to resolve produces a warning and no entry; the batch
//! always completes. Nothing is retried.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

use super::error::ArchiveError;
use super::filename::sanitize_filename;
use super::resolver::{DownloadResolver, DownloadedFile};

/// Minimum allowed concurrency value.
pub const MIN_ARCHIVE_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub const MAX_ARCHIVE_CONCURRENCY: usize = 32;

/// Default number of concurrent file downloads per bundler.
pub const DEFAULT_ARCHIVE_CONCURRENCY: usize = 4;

/// Suggested filename for multi-file downloads.
pub const ARCHIVE_FILENAME: &str = "files.zip";

/// A path that did not make it into the archive, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveWarning {
    /// Resource path that was skipped.
    pub path: String,
    /// Human-readable reason.
    pub message: String,
    /// Upstream HTTP status, when the failure was an HTTP error.
    pub status: Option<u16>,
}

/// A finished archive plus per-path warnings.
#[derive(Debug, Clone)]
pub struct ArchiveResult {
    /// Complete zip file bytes.
    pub bytes: Vec<u8>,
    /// Entry names written, in input order.
    pub entries: Vec<String>,
    /// One warning per skipped path, in input order.
    pub warnings: Vec<ArchiveWarning>,
}

impl ArchiveResult {
    /// Returns true when at least one requested path was skipped.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns true when no entry was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Downloads a set of paths and writes them into a zip archive.
#[derive(Debug, Clone)]
pub struct ArchiveBundler {
    resolver: DownloadResolver,
    semaphore: Arc<Semaphore>,
    concurrency: usize,
}

impl ArchiveBundler {
    /// Creates a bundler that runs at most `concurrency` downloads at once.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-32).
    #[instrument(level = "debug", skip(resolver))]
    pub fn new(resolver: DownloadResolver, concurrency: usize) -> Result<Self, ArchiveError> {
        if !(MIN_ARCHIVE_CONCURRENCY..=MAX_ARCHIVE_CONCURRENCY).contains(&concurrency) {
            return Err(ArchiveError::InvalidConcurrency { value: concurrency });
        }
        Ok(Self {
            resolver,
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Downloads every path in `paths` and bundles the successes.
    ///
    /// Repeated paths are downloaded once. Entries are named by sanitized
    /// basename; when two paths share an entry name the first one in input order keeps
    /// it and the later one is reported as a warning instead of
    /// overwriting.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] only when the archive itself cannot be
    /// written. Per-file failures are reported in
    /// [`ArchiveResult::warnings`].
    #[instrument(skip(self, paths), fields(share_key = %share_key, requested = paths.len()))]
    pub async fn bundle(&self, share_key: &str, paths: &[String]) -> Result<ArchiveResult, ArchiveError> {
        let mut seen = HashSet::new();
        let unique: Vec<&String> = paths.iter().filter(|p| seen.insert(p.as_str())).collect();

        info!(files = unique.len(), concurrency = self.concurrency, "building archive");

        let mut handles = Vec::with_capacity(unique.len());
        for path in unique {
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| ArchiveError::SemaphoreClosed)?;

            let resolver = self.resolver.clone();
            let share_key = share_key.to_string();
            let task_path = path.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit;
                resolver.resolve(&share_key, &task_path).await
            });
            handles.push((path.clone(), handle));
        }

        let mut archive = ArchiveWriter::new();
        let mut warnings = Vec::new();

        for (path, handle) in handles {
            match handle.await {
                Ok(Ok(file)) => {
                    let entry = sanitize_filename(&file.name);
                    if let Some(previous) = archive.owner_of(&entry) {
                        warn!(path = %path, entry = %entry, "duplicate entry name; skipping");
                        warnings.push(ArchiveWarning {
                            path,
                            message: format!("entry name {entry} is already used by {previous}"),
                            status: None,
                        });
                        continue;
                    }
                    archive.add(entry, &file)?;
                }
                Ok(Err(error)) => {
                    warn!(path = %path, error = %error, "skipping file that failed to download");
                    warnings.push(ArchiveWarning {
                        path,
                        message: error.to_string(),
                        status: error.source.status(),
                    });
                }
                Err(join_error) => {
                    warn!(path = %path, error = %join_error, "download task failed");
                    warnings.push(ArchiveWarning {
                        path,
                        message: format!("download task failed: {join_error}"),
                        status: None,
                    });
                }
            }
        }

        let (bytes, entries) = archive.finish()?;
        info!(
            entries = entries.len(),
            warnings = warnings.len(),
            bytes = bytes.len(),
            "archive complete"
        );
        Ok(ArchiveResult {
            bytes,
            entries,
            warnings,
        })
    }
}

/// Zip writer that remembers which path produced each entry name.
struct ArchiveWriter {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    entries: Vec<(String, String)>,
}

impl ArchiveWriter {
    fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            entries: Vec::new(),
        }
    }

    fn owner_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, path)| path.as_str())
    }

    fn add(&mut self, entry: String, file: &DownloadedFile) -> Result<(), ArchiveError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .large_file(file.bytes.len() as u64 >= u64::from(u32::MAX));
        self.writer
            .start_file(entry.as_str(), options)
            .map_err(|source| ArchiveError::Write {
                entry: entry.clone(),
                source,
            })?;
        self.writer
            .write_all(&file.bytes)
            .map_err(|e| ArchiveError::Write {
                entry: entry.clone(),
                source: ZipError::Io(e),
            })?;
        debug!(entry = %entry, bytes = file.bytes.len(), "archive entry written");
        self.entries.push((entry, file.path.clone()));
        Ok(())
    }

    fn finish(self) -> Result<(Vec<u8>, Vec<String>), ArchiveError> {
        let cursor = self
            .writer
            .finish()
            .map_err(|source| ArchiveError::Finish { source })?;
        let names = self.entries.into_iter().map(|(name, _)| name).collect();
        Ok((cursor.into_inner(), names))
    }
}
