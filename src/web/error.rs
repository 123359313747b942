//! User-facing failures of the web layer.
//!
//! Every variant ends up as a flash message on a redirect; handlers never
//! surface a raw error page.

use thiserror::Error;

use crate::api::ApiError;
use crate::download::ResolveError;

use super::flash::Flash;

/// Shown when the link form is submitted empty.
pub const MISSING_LINK_MESSAGE: &str = "Please enter a public link.";

/// Shown when the submitted link is not a share link of the provider.
pub const INVALID_LINK_MESSAGE: &str = "Invalid Yandex Disk public link.";

/// Shown when a download request lacks its parameters.
pub const INVALID_DOWNLOAD_MESSAGE: &str = "Invalid download parameters.";

/// Shown when a query string or form body cannot be parsed at all.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request parameters.";

/// Shown when a multi-download form carries no selection.
pub const NO_SELECTION_MESSAGE: &str = "No files selected for download.";

/// Failure categories reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebError {
    /// Input rejected before any upstream call.
    #[error("{0}")]
    Validation(String),

    /// Upstream answered with a non-success status.
    #[error("HTTP error occurred: {status} {message}")]
    UpstreamHttp {
        /// Upstream status code.
        status: u16,
        /// Provider message, prefixed with the resource path when known.
        message: String,
    },

    /// The upstream exchange itself failed.
    #[error("Error occurred: {0}")]
    UpstreamTransport(String),

    /// Some or all files of a multi-download could not be fetched.
    #[error("{failed} of {requested} selected files could not be downloaded.")]
    PartialBatchFailure {
        /// Paths skipped.
        failed: usize,
        /// Distinct paths requested.
        requested: usize,
    },
}

impl WebError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Flash message for this failure.
    ///
    /// A batch where at least one file made it is a warning; everything
    /// else is an error.
    #[must_use]
    pub fn flash(&self) -> Flash {
        match self {
            Self::PartialBatchFailure { failed, requested } if failed < requested => {
                Flash::warning(self.to_string())
            }
            _ => Flash::danger(self.to_string()),
        }
    }
}

impl From<ApiError> for WebError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Http { status, message, .. } => Self::UpstreamHttp { status, message },
            ApiError::Transport { message, .. } => Self::UpstreamTransport(message),
            ApiError::InvalidRequest { message } => Self::Validation(message),
        }
    }
}

impl From<ResolveError> for WebError {
    fn from(error: ResolveError) -> Self {
        let path = error.path;
        match Self::from(error.source) {
            Self::UpstreamHttp { status, message } => Self::UpstreamHttp {
                status,
                message: format!("{path}: {message}"),
            },
            Self::UpstreamTransport(message) => Self::UpstreamTransport(format!("{path}: {message}")),
            other => other,
        }
    }
}
