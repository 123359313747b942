//! reqwest-backed client for the keyless public resource API.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use tracing::{debug, instrument, warn};
use url::Url;

use super::http_client::{HttpTimeouts, build_http_client};
use super::model::{ListingPage, RawDownloadLink, RawErrorBody, RawListing};
use super::{ApiError, FetchedContent, PublicResourceApi};

/// Default public resource API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk/public";

/// Client for the provider's public (share-link) endpoints.
///
/// Create once and share; the inner [`reqwest::Client`] pools connections.
#[derive(Clone)]
pub struct PublicApiClient {
    client: Client,
    base_url: String,
}

impl PublicApiClient {
    /// Creates a client for the production API with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_settings(DEFAULT_API_BASE_URL, HttpTimeouts::default())
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if HTTP client construction fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_settings(base_url, HttpTimeouts::default())
    }

    /// Creates a client with an explicit base URL and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if HTTP client construction fails.
    #[instrument(level = "debug", skip(base_url))]
    pub fn with_settings(
        base_url: impl Into<String>,
        timeouts: HttpTimeouts,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = build_http_client(timeouts)?;
        Ok(Self { client, base_url })
    }

    /// Returns the configured API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, suffix: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let raw = format!("{}{suffix}", self.base_url);
        Url::parse_with_params(&raw, params)
            .map_err(|e| ApiError::invalid_request(format!("invalid endpoint URL {raw}: {e}")))
    }

    async fn get(&self, url: Url) -> Result<Response, ApiError> {
        let display_url = strip_query(&url);
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(url = %display_url, error = %error, "upstream request failed");
                return Err(ApiError::from_reqwest(display_url, &error));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or("request failed").to_string();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<RawErrorBody>(&body)
                .ok()
                .and_then(RawErrorBody::into_message)
                .unwrap_or(reason),
            Err(_) => reason,
        };
        warn!(url = %display_url, status = status.as_u16(), %message, "upstream returned error status");
        Err(ApiError::http(display_url, status.as_u16(), message))
    }
}

impl std::fmt::Debug for PublicApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PublicResourceApi for PublicApiClient {
    #[instrument(skip(self), fields(share_key = %share_key))]
    async fn list_public_resource(
        &self,
        share_key: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ListingPage, ApiError> {
        ensure_share_key(share_key)?;
        let limit_param = limit.to_string();
        let offset_param = offset.to_string();
        let url = self.endpoint(
            "/resources",
            &[
                ("public_key", share_key),
                ("limit", limit_param.as_str()),
                ("offset", offset_param.as_str()),
            ],
        )?;
        let display_url = strip_query(&url);

        debug!(url = %display_url, "listing public resource");
        let response = self.get(url).await?;
        let raw = response
            .json::<RawListing>()
            .await
            .map_err(|e| ApiError::from_reqwest(&display_url, &e))?;

        let page = ListingPage::from_raw(raw, limit, offset);
        debug!(items = page.items.len(), total = page.total, "listing received");
        Ok(page)
    }

    #[instrument(skip(self), fields(share_key = %share_key, path = %path))]
    async fn download_href(&self, share_key: &str, path: &str) -> Result<String, ApiError> {
        ensure_share_key(share_key)?;
        let url = self.endpoint(
            "/resources/download",
            &[("public_key", share_key), ("path", path)],
        )?;
        let display_url = strip_query(&url);

        let response = self.get(url).await?;
        let link = response
            .json::<RawDownloadLink>()
            .await
            .map_err(|e| ApiError::from_reqwest(&display_url, &e))?;

        match link.href.filter(|href| !href.trim().is_empty()) {
            Some(href) => {
                debug!("download link resolved");
                Ok(href)
            }
            None => Err(ApiError::transport(
                display_url,
                "download link response has no href",
            )),
        }
    }

    #[instrument(skip(self, href))]
    async fn fetch_content(&self, href: &str) -> Result<FetchedContent, ApiError> {
        let url = Url::parse(href).map_err(|e| {
            ApiError::transport(redact_href(href), format!("invalid download URL: {e}"))
        })?;
        let display_url = strip_query(&url);

        let response = self.get(url).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(&display_url, &e))?;

        debug!(bytes = bytes.len(), "content fetched");
        Ok(FetchedContent {
            bytes,
            content_type,
        })
    }
}

fn ensure_share_key(share_key: &str) -> Result<(), ApiError> {
    if share_key.trim().is_empty() {
        return Err(ApiError::invalid_request("share key is empty"));
    }
    Ok(())
}

/// URL without query string, for logs and error context (signed download
/// URLs carry tokens in the query).
fn strip_query(url: &Url) -> String {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    stripped.to_string()
}

/// Longest prefix of an unparseable href kept in error context.
const MAX_REDACTED_HREF_CHARS: usize = 128;

/// Best-effort `strip_query` for hrefs that do not parse as URLs.
fn redact_href(href: &str) -> String {
    let without_query = href.split(['?', '#']).next().unwrap_or_default();
    without_query.chars().take(MAX_REDACTED_HREF_CHARS).collect()
}
