//! Error types for the public resource API client.
//!
//! Every upstream failure is normalized into one of two kinds: the provider
//! answered with a non-success status ([`ApiError::Http`]), or the exchange
//! itself failed ([`ApiError::Transport`]: DNS, connect, timeout, unreadable
//! or malformed body).

use thiserror::Error;

/// Errors that can occur while talking to the public resource API.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Upstream answered with a non-2xx status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// The request URL (without query string).
        url: String,
        /// The HTTP status code.
        status: u16,
        /// Provider message or reason phrase.
        message: String,
    },

    /// Network-level or decoding failure.
    #[error("transport error calling {url}: {message}")]
    Transport {
        /// The request URL (without query string).
        url: String,
        /// Description of the failure.
        message: String,
    },

    /// The request was rejected locally before any network access.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// What was wrong with the request.
        message: String,
    },
}

impl ApiError {
    /// Creates an HTTP status error.
    pub fn http(url: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a transport error from a reqwest failure.
    ///
    /// Timeouts are called out explicitly since they are the most common
    /// failure for a stuck upstream.
    pub fn from_reqwest(url: impl Into<String>, source: &reqwest::Error) -> Self {
        let message = if source.is_timeout() {
            format!("request timed out: {source}")
        } else if source.is_decode() {
            format!("malformed response body: {source}")
        } else {
            source.to_string()
        };
        Self::transport(url, message)
    }

    /// Creates a local validation error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Returns the upstream HTTP status, if this is an HTTP error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for non-2xx upstream answers.
    #[must_use]
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Returns true for network and decoding failures.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

// No `From<reqwest::Error>`: every variant needs the request URL for context,
// so callers go through `from_reqwest`.
