//! Share link validation.
//!
//! Public resources are addressed by their share link, e.g.
//! `https://disk.yandex.ru/d/AbC-123`. The link is checked against the
//! provider's URL shape before any upstream request is made, so malformed
//! input never costs a network round-trip.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

/// Host that issues public share links by default.
pub const DEFAULT_PROVIDER_HOST: &str = "disk.yandex.ru";

/// Validator for the default provider host.
static DEFAULT_VALIDATOR: LazyLock<LinkValidator> =
    LazyLock::new(|| LinkValidator::new(DEFAULT_PROVIDER_HOST));

/// Matches share links of the form `http(s)://<host>/d/<id>`.
#[derive(Debug, Clone)]
pub struct LinkValidator {
    host: String,
    pattern: Option<Regex>,
}

impl LinkValidator {
    /// Creates a validator for share links issued by `host`.
    ///
    /// The host is matched literally (regex metacharacters are escaped).
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let source = format!(r"^https?://{}/d/[\w-]+$", regex::escape(&host));
        // Escaped host keeps the pattern well-formed; a build failure leaves
        // the validator rejecting everything rather than panicking.
        let pattern = Regex::new(&source).ok();
        Self { host, pattern }
    }

    /// Returns the host this validator accepts.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true when `raw` is a well-formed share link for this host.
    #[must_use]
    pub fn is_valid(&self, raw: &str) -> bool {
        let valid = self
            .pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(raw));
        if valid {
            trace!(link = %raw, "share link accepted");
        } else {
            debug!(link = %raw, host = %self.host, "share link rejected");
        }
        valid
    }
}

impl Default for LinkValidator {
    fn default() -> Self {
        DEFAULT_VALIDATOR.clone()
    }
}

/// Returns true when `raw` is a share link for [`DEFAULT_PROVIDER_HOST`].
///
/// # Examples
///
/// ```
/// use sharelink_core::link::is_valid_share_link;
///
/// assert!(is_valid_share_link("https://disk.yandex.ru/d/abc123"));
/// assert!(!is_valid_share_link("disk.yandex.ru/d/abc123"));
/// ```
#[must_use]
pub fn is_valid_share_link(raw: &str) -> bool {
    DEFAULT_VALIDATOR.is_valid(raw)
}
