//! Public resource API: listing, download links and content fetches.
//!
//! # Architecture
//!
//! - [`PublicResourceApi`] - Async trait over the three upstream calls, so the
//!   cache, resolver and web layer can run against a mock in tests
//! - [`PublicApiClient`] - reqwest implementation against the provider
//! - [`ListingPage`] / [`ResourceItem`] - normalized listing data
//! - [`ApiError`] - Http / Transport failure taxonomy
//!
//! # Example
//!
//! ```no_run
//! use sharelink_core::api::{PublicApiClient, PublicResourceApi};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PublicApiClient::new()?;
//! let page = client
//!     .list_public_resource("https://disk.yandex.ru/d/abc123", 100, 0)
//!     .await?;
//! println!("{} of {} items", page.items.len(), page.total);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod http_client;
mod model;

pub use client::{DEFAULT_API_BASE_URL, PublicApiClient};
pub use error::ApiError;
pub use http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts};
pub use model::{ListingPage, ResourceItem, ResourceKind};

use async_trait::async_trait;
use bytes::Bytes;

/// Raw bytes of a fetched file plus the content type the server reported.
#[derive(Debug, Clone)]
pub struct FetchedContent {
    /// File content.
    pub bytes: Bytes,
    /// `Content-Type` of the content response, if any.
    pub content_type: Option<String>,
}

/// The upstream calls this crate depends on.
///
/// Implementations perform a single attempt per call; nothing is retried.
#[async_trait]
pub trait PublicResourceApi: Send + Sync {
    /// Lists one page of the public resource identified by `share_key`.
    async fn list_public_resource(
        &self,
        share_key: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ListingPage, ApiError>;

    /// Obtains a short-lived direct URL for the file at `path`.
    async fn download_href(&self, share_key: &str, path: &str) -> Result<String, ApiError>;

    /// Fetches the bytes behind a direct URL from [`download_href`](Self::download_href).
    async fn fetch_content(&self, href: &str) -> Result<FetchedContent, ApiError>;
}
