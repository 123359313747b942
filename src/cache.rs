//! Time-boxed memoization of listing responses.
//!
//! [`TtlCache`] is a generic, thread-safe `get_or_compute` cache; entries
//! older than the caller's TTL are never served. [`CachedListing`] puts it in
//! front of any [`PublicResourceApi`] so repeated navigation over the same
//! page does not hit the provider again.
//!
//! The cache only changes request volume, never output: a cache with a zero
//! TTL behaves exactly like the bare client.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, instrument, trace};

use crate::api::{ApiError, FetchedContent, ListingPage, PublicResourceApi};

/// Default time-to-live for cached listings (5 minutes).
pub const DEFAULT_LISTING_TTL: Duration = Duration::from_secs(300);

/// A cached value and the moment it was stored.
#[derive(Debug, Clone)]
struct CachedEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> CachedEntry<V> {
    #[inline]
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
    }
}

/// Thread-safe cache with per-lookup TTL and at most one entry per key.
///
/// Concurrent misses on the same key may both compute; the later insert
/// replaces the earlier one.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sharelink_core::cache::TtlCache;
///
/// # tokio_test::block_on(async {
/// let cache: TtlCache<&str, u32> = TtlCache::new();
/// let ttl = Duration::from_secs(60);
/// let first = cache.get_or_compute("k", ttl, || async { Ok::<_, ()>(1) }).await;
/// let second = cache.get_or_compute("k", ttl, || async { Ok::<_, ()>(2) }).await;
/// assert_eq!(first, Ok(1));
/// assert_eq!(second, Ok(1));
/// # });
/// ```
#[derive(Debug)]
pub struct TtlCache<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, CachedEntry<V>>,
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key` if it was stored less than `ttl` ago.
    ///
    /// A stale entry is evicted on the way out; an entry refreshed
    /// concurrently in between is left alone.
    pub fn get(&self, key: &K, ttl: Duration) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh(ttl) {
                return Some(entry.value.clone());
            }
            drop(entry);
            self.entries.remove_if(key, |_, entry| !entry.is_fresh(ttl));
        }
        None
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(
            key,
            CachedEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Returns the fresh cached value for `key`, or runs `compute` and caches
    /// its `Ok` result.
    ///
    /// Errors are returned to the caller and not stored. A zero `ttl`
    /// disables caching entirely. Every miss also sweeps entries of other
    /// keys that are older than `ttl`, so keys that are never read again do
    /// not outlive it.
    ///
    /// # Errors
    ///
    /// Returns whatever error `compute` produced.
    pub async fn get_or_compute<F, Fut, E>(&self, key: K, ttl: Duration, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key, ttl) {
            trace!("cache hit");
            return Ok(value);
        }
        trace!("cache miss");
        let purged = self.purge_expired(ttl);
        if purged > 0 {
            debug!(purged, remaining = self.entries.len(), "evicted expired cache entries");
        }
        let value = compute().await?;
        if !ttl.is_zero() {
            self.insert(key, value.clone());
        }
        Ok(value)
    }

    /// Removes every entry older than `ttl`. Returns how many were removed.
    pub fn purge_expired(&self, ttl: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(ttl));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries (fresh or not yet evicted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

/// Cache key for one listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingKey {
    /// Share link the page belongs to.
    pub share_key: String,
    /// Page size.
    pub limit: u32,
    /// Page offset.
    pub offset: u32,
}

/// [`PublicResourceApi`] decorator that memoizes listings for a fixed TTL.
///
/// Download links and content are passed straight through: links are
/// short-lived and content is too large to keep.
pub struct CachedListing {
    inner: Arc<dyn PublicResourceApi>,
    cache: Arc<TtlCache<ListingKey, ListingPage>>,
    ttl: Duration,
}

impl CachedListing {
    /// Wraps `inner` with a fresh cache.
    #[must_use]
    pub fn new(inner: Arc<dyn PublicResourceApi>, ttl: Duration) -> Self {
        Self::with_cache(inner, Arc::new(TtlCache::new()), ttl)
    }

    /// Wraps `inner` with an injected cache (e.g. shared or inspected by tests).
    #[must_use]
    pub fn with_cache(
        inner: Arc<dyn PublicResourceApi>,
        cache: Arc<TtlCache<ListingKey, ListingPage>>,
        ttl: Duration,
    ) -> Self {
        debug!(ttl_secs = ttl.as_secs(), "listing cache configured");
        Self { inner, cache, ttl }
    }

    /// Configured time-to-live.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The underlying cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<TtlCache<ListingKey, ListingPage>> {
        &self.cache
    }
}

impl std::fmt::Debug for CachedListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedListing")
            .field("ttl", &self.ttl)
            .field("entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PublicResourceApi for CachedListing {
    #[instrument(level = "debug", skip(self), fields(share_key = %share_key))]
    async fn list_public_resource(
        &self,
        share_key: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ListingPage, ApiError> {
        let key = ListingKey {
            share_key: share_key.to_string(),
            limit,
            offset,
        };
        self.cache
            .get_or_compute(key, self.ttl, || {
                self.inner.list_public_resource(share_key, limit, offset)
            })
            .await
    }

    async fn download_href(&self, share_key: &str, path: &str) -> Result<String, ApiError> {
        self.inner.download_href(share_key, path).await
    }

    async fn fetch_content(&self, href: &str) -> Result<FetchedContent, ApiError> {
        self.inner.fetch_content(href).await
    }
}
