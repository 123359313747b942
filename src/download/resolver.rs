//! Two-step download of a single file from a public resource.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, instrument, warn};

use crate::api::PublicResourceApi;

use super::error::{ResolveError, ResolveStage};
use super::filename::basename;

/// A downloaded file held in memory.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// Suggested filename (basename of the resource path).
    pub name: String,
    /// Resource path the file was downloaded from.
    pub path: String,
    /// `Content-Type` reported for the content, if any.
    pub content_type: Option<String>,
    /// File content.
    pub bytes: Bytes,
}

/// Resolves a resource path to its bytes: download link first, then content.
///
/// Each step is a single attempt; a failed link step never triggers a
/// content fetch.
#[derive(Clone)]
pub struct DownloadResolver {
    api: Arc<dyn PublicResourceApi>,
}

impl DownloadResolver {
    /// Creates a resolver over `api`.
    #[must_use]
    pub fn new(api: Arc<dyn PublicResourceApi>) -> Self {
        Self { api }
    }

    /// Downloads the file at `path` inside the resource `share_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] naming the path and the failed step.
    #[instrument(skip(self), fields(share_key = %share_key, path = %path))]
    pub async fn resolve(&self, share_key: &str, path: &str) -> Result<DownloadedFile, ResolveError> {
        let href = self
            .api
            .download_href(share_key, path)
            .await
            .map_err(|source| {
                warn!(error = %source, "download link request failed");
                ResolveError::new(path, ResolveStage::Link, source)
            })?;
        debug!("download link obtained");

        let content = self.api.fetch_content(&href).await.map_err(|source| {
            warn!(error = %source, "file content request failed");
            ResolveError::new(path, ResolveStage::Content, source)
        })?;

        info!(bytes = content.bytes.len(), "file downloaded");
        Ok(DownloadedFile {
            name: basename(path).to_string(),
            path: path.to_string(),
            content_type: content.content_type,
            bytes: content.bytes,
        })
    }
}

impl std::fmt::Debug for DownloadResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadResolver").finish_non_exhaustive()
    }
}
