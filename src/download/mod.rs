//! Single-file downloads and multi-file zip bundles.
//!
//! # Features
//!
//! - Two-step resolution: download link, then content (no retries)
//! - Per-path failure isolation when bundling
//! - Bounded concurrent fan-out with deterministic output order
//! - Basename entry names with explicit duplicate reporting
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sharelink_core::api::PublicApiClient;
//! use sharelink_core::download::{ArchiveBundler, DownloadResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = DownloadResolver::new(Arc::new(PublicApiClient::new()?));
//! let bundler = ArchiveBundler::new(resolver, 4)?;
//! let paths = vec!["/a.pdf".to_string(), "/b.jpg".to_string()];
//! let archive = bundler.bundle("https://disk.yandex.ru/d/abc123", &paths).await?;
//! println!("{} entries, {} warnings", archive.entries.len(), archive.warnings.len());
//! # Ok(())
//! # }
//! ```

mod archive;
mod error;
pub mod filename;
mod resolver;

pub use archive::{
    ARCHIVE_FILENAME, ArchiveBundler, ArchiveResult, ArchiveWarning, DEFAULT_ARCHIVE_CONCURRENCY,
    MAX_ARCHIVE_CONCURRENCY, MIN_ARCHIVE_CONCURRENCY,
};
pub use error::{ArchiveError, ResolveError, ResolveStage};
pub use resolver::{DownloadResolver, DownloadedFile};
