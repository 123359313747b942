//! Runtime configuration for the web tool.
//!
//! Values arrive from CLI flags / environment (see the binary) and are
//! validated here once, before anything is constructed from them.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::api::{DEFAULT_API_BASE_URL, HttpTimeouts};
use crate::cache::DEFAULT_LISTING_TTL;
use crate::download::{DEFAULT_ARCHIVE_CONCURRENCY, MAX_ARCHIVE_CONCURRENCY, MIN_ARCHIVE_CONCURRENCY};
use crate::link::DEFAULT_PROVIDER_HOST;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Default number of items per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size the provider accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A numeric setting is outside its allowed range.
    #[error("invalid config value for `{field}`: {value}. Expected range: {min}..={max}")]
    OutOfRange {
        /// Setting name.
        field: &'static str,
        /// Rejected value.
        value: u64,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },

    /// A URL setting is not an absolute http(s) URL.
    #[error("invalid config value for `{field}`: {value} is not an absolute http(s) URL")]
    InvalidUrl {
        /// Setting name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The provider host is empty or contains URL syntax.
    #[error("invalid config value for `provider_host`: {0:?}")]
    InvalidHost(String),
}

/// Fully resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    pub bind: SocketAddr,
    /// Base URL of the public resource API.
    pub api_base_url: String,
    /// Host whose share links are accepted.
    pub provider_host: String,
    /// Items requested per listing page.
    pub page_size: u32,
    /// Listing cache TTL; zero disables caching.
    pub cache_ttl: Duration,
    /// Upstream timeouts.
    pub timeouts: HttpTimeouts,
    /// Concurrent file downloads while bundling an archive.
    pub archive_concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            provider_host: DEFAULT_PROVIDER_HOST.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            cache_ttl: DEFAULT_LISTING_TTL,
            timeouts: HttpTimeouts::default(),
            archive_concurrency: DEFAULT_ARCHIVE_CONCURRENCY,
        }
    }
}

impl AppConfig {
    /// Validates every setting against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("page_size", u64::from(self.page_size), 1, u64::from(MAX_PAGE_SIZE))?;
        check_range("cache_ttl_secs", self.cache_ttl.as_secs(), 0, 86_400)?;
        check_range("connect_timeout_secs", self.timeouts.connect_secs, 1, 3600)?;
        check_range("read_timeout_secs", self.timeouts.read_secs, 1, 3600)?;
        check_range(
            "archive_concurrency",
            self.archive_concurrency as u64,
            MIN_ARCHIVE_CONCURRENCY as u64,
            MAX_ARCHIVE_CONCURRENCY as u64,
        )?;

        let url_ok = url::Url::parse(&self.api_base_url)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
        if !url_ok {
            return Err(ConfigError::InvalidUrl {
                field: "api_base_url",
                value: self.api_base_url.clone(),
            });
        }

        let host = self.provider_host.trim();
        if host.is_empty() || host.contains('/') || host.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidHost(self.provider_host.clone()));
        }

        Ok(())
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
