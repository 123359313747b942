//! Browser-facing HTTP routes.
//!
//! | Route                     | Purpose                                  |
//! |---------------------------|------------------------------------------|
//! | `GET /`                   | link form                                |
//! | `POST /`                  | validate link, redirect to the listing   |
//! | `GET /files`              | one filtered page of the resource        |
//! | `GET /download`           | single file as attachment                |
//! | `POST /download_multiple` | zip bundle of the selected files         |
//! | `GET /healthz`            | liveness probe                           |
//!
//! Failures never render an error page: they become a flash message and a
//! redirect (see [`error::WebError`]).

pub mod error;
pub mod flash;
pub mod handlers;
pub mod views;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{ApiError, PublicApiClient, PublicResourceApi};
use crate::cache::CachedListing;
use crate::config::{AppConfig, ConfigError};
use crate::download::{ArchiveBundler, ArchiveError, DownloadResolver};
use crate::link::LinkValidator;

/// Failures while assembling the application from its configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration did not validate.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The upstream HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] ApiError),
    /// The archive bundler rejected its settings.
    #[error(transparent)]
    Bundler(#[from] ArchiveError),
}

/// Shared state behind every route.
pub struct AppState {
    pub(crate) api: Arc<dyn PublicResourceApi>,
    pub(crate) resolver: DownloadResolver,
    pub(crate) bundler: ArchiveBundler,
    pub(crate) validator: LinkValidator,
    pub(crate) page_size: u32,
}

impl AppState {
    /// Assembles state over an arbitrary upstream.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Bundler`] for an out-of-range concurrency.
    pub fn new(
        api: Arc<dyn PublicResourceApi>,
        validator: LinkValidator,
        page_size: u32,
        archive_concurrency: usize,
    ) -> Result<Self, SetupError> {
        let resolver = DownloadResolver::new(Arc::clone(&api));
        let bundler = ArchiveBundler::new(resolver.clone(), archive_concurrency)?;
        Ok(Self {
            api,
            resolver,
            bundler,
            validator,
            page_size,
        })
    }

    /// Builds the production stack: HTTP client, listing cache, resolver
    /// and bundler.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] when the config is invalid or the client
    /// cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let client = PublicApiClient::with_settings(&config.api_base_url, config.timeouts)?;
        let api: Arc<dyn PublicResourceApi> =
            Arc::new(CachedListing::new(Arc::new(client), config.cache_ttl));
        Self::new(
            api,
            LinkValidator::new(config.provider_host.trim()),
            config.page_size,
            config.archive_concurrency,
        )
    }

    /// Items requested per listing page.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("validator", &self.validator)
            .field("page_size", &self.page_size)
            .field("archive_concurrency", &self.bundler.concurrency())
            .finish_non_exhaustive()
    }
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit_link))
        .route("/files", get(handlers::files))
        .route("/download", get(handlers::download))
        .route("/download_multiple", post(handlers::download_multiple))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}

/// Serves the router on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
