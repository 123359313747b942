//! In-memory [`PublicResourceApi`] double shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::api::{ApiError, FetchedContent, ListingPage, PublicResourceApi};

/// Scripted upstream: a fixed listing, per-path download links and per-href
/// content, with call counters.
#[derive(Default)]
pub(crate) struct StubApi {
    listing: Mutex<Option<Result<ListingPage, ApiError>>>,
    links: HashMap<String, Result<String, ApiError>>,
    contents: HashMap<String, Result<FetchedContent, ApiError>>,
    list_calls: AtomicUsize,
    link_calls: AtomicUsize,
    content_calls: AtomicUsize,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, listing: Result<ListingPage, ApiError>) -> Self {
        if let Ok(mut slot) = self.listing.lock() {
            *slot = Some(listing);
        }
        self
    }

    pub fn set_listing(&self, listing: Result<ListingPage, ApiError>) {
        if let Ok(mut slot) = self.listing.lock() {
            *slot = Some(listing);
        }
    }

    /// Registers a file whose link and content both resolve.
    pub fn with_file(mut self, path: &str, body: &[u8]) -> Self {
        let href = format!("https://downloader.example{path}");
        self.links.insert(path.to_string(), Ok(href.clone()));
        self.contents.insert(
            href,
            Ok(FetchedContent {
                bytes: Bytes::copy_from_slice(body),
                content_type: Some("application/octet-stream".to_string()),
            }),
        );
        self
    }

    /// Registers a path whose download-link call fails.
    pub fn with_link_error(mut self, path: &str, error: ApiError) -> Self {
        self.links.insert(path.to_string(), Err(error));
        self
    }

    /// Registers a path whose link resolves but whose content fetch fails.
    pub fn with_content_error(mut self, path: &str, error: ApiError) -> Self {
        let href = format!("https://downloader.example{path}");
        self.links.insert(path.to_string(), Ok(href.clone()));
        self.contents.insert(href, Err(error));
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn link_calls(&self) -> usize {
        self.link_calls.load(Ordering::SeqCst)
    }

    pub fn content_calls(&self) -> usize {
        self.content_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublicResourceApi for StubApi {
    async fn list_public_resource(
        &self,
        _share_key: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ListingPage, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.listing
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .unwrap_or_else(|| Ok(ListingPage::empty(limit, offset)))
    }

    async fn download_href(&self, _share_key: &str, path: &str) -> Result<String, ApiError> {
        self.link_calls.fetch_add(1, Ordering::SeqCst);
        self.links
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::http("stub://download", 404, "Resource not found.")))
    }

    async fn fetch_content(&self, href: &str) -> Result<FetchedContent, ApiError> {
        self.content_calls.fetch_add(1, Ordering::SeqCst);
        self.contents
            .get(href)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::http(href, 404, "Not Found")))
    }
}
