//! Upstream response schemas and their normalized counterparts.
//!
//! The provider's JSON is only loosely trusted: every field is optional on
//! the wire and defaulted here, once, so the rest of the crate works with
//! plain typed values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

// ==================== Upstream Response Types ====================

/// Top-level body of the "list public resource" endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawListing {
    #[serde(rename = "_embedded")]
    pub embedded: Option<RawEmbedded>,
}

/// The `_embedded` collection wrapper.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawEmbedded {
    /// Kept as raw JSON so non-object entries can be dropped one by one.
    pub items: Option<Value>,
    pub total: Option<u64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// One entry of `_embedded.items`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawItem {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub mime_type: Option<String>,
    /// Either the direct file URL (string) or, in some responses, an object
    /// carrying its own `mime_type`.
    pub file: Option<Value>,
    pub size: Option<u64>,
    pub modified: Option<String>,
}

/// Body of the "download link" endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDownloadLink {
    pub href: Option<String>,
}

/// Error body returned by the provider alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct RawErrorBody {
    pub message: Option<String>,
    pub description: Option<String>,
}

impl RawErrorBody {
    /// Best human-readable message in the body, if any.
    pub(crate) fn into_message(self) -> Option<String> {
        self.message
            .or(self.description)
            .filter(|m| !m.trim().is_empty())
    }
}

// ==================== Normalized Types ====================

/// Whether a listed resource is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A downloadable file.
    File,
    /// A folder; never carries a mime type.
    Folder,
}

/// One file or folder inside a public resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceItem {
    /// Display name.
    pub name: String,
    /// Provider-side locator, passed back verbatim for downloads.
    pub path: String,
    /// File or folder.
    pub kind: ResourceKind,
    /// Mime type reported by the provider (files only).
    pub mime_type: Option<String>,
    /// Size in bytes, when reported.
    pub size: Option<u64>,
    /// Last modification timestamp as reported (RFC 3339).
    pub modified: Option<String>,
}

impl ResourceItem {
    /// Creates a file item.
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<String>, mime_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: ResourceKind::File,
            mime_type: mime_type.map(ToString::to_string),
            size: None,
            modified: None,
        }
    }

    /// Creates a folder item.
    #[must_use]
    pub fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: ResourceKind::Folder,
            mime_type: None,
            size: None,
            modified: None,
        }
    }

    /// Returns true for file items.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == ResourceKind::File
    }

    /// Lowercased mime type, or an empty string when absent.
    #[must_use]
    pub fn mime_lowercase(&self) -> String {
        self.mime_type
            .as_deref()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }

    fn from_raw(raw: RawItem) -> Self {
        let kind = match raw.kind.as_deref() {
            Some("file") => ResourceKind::File,
            _ => ResourceKind::Folder,
        };
        let mime_type = match kind {
            ResourceKind::Folder => None,
            ResourceKind::File => raw.mime_type.or_else(|| {
                raw.file
                    .as_ref()
                    .and_then(|file| file.get("mime_type"))
                    .and_then(Value::as_str)
                    .map(ToString::to_string)
            }),
        };
        Self {
            name: raw.name,
            path: raw.path,
            kind,
            mime_type,
            size: raw.size,
            modified: raw.modified,
        }
    }
}

/// One page of a public resource listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingPage {
    /// Items in upstream order.
    pub items: Vec<ResourceItem>,
    /// Total item count of the resource (not of this page).
    pub total: u64,
    /// Page size used for this page.
    pub limit: u32,
    /// Offset of the first item of this page.
    pub offset: u32,
}

impl ListingPage {
    /// An empty page at the given position.
    #[must_use]
    pub fn empty(limit: u32, offset: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit,
            offset,
        }
    }

    /// Normalizes an upstream body.
    ///
    /// A missing `_embedded` or `items` collection yields an empty page;
    /// entries that are not objects, or lack `name`/`path`, are dropped.
    pub(crate) fn from_raw(raw: RawListing, limit: u32, offset: u32) -> Self {
        let Some(embedded) = raw.embedded else {
            debug!("listing has no _embedded collection; treating as empty");
            return Self::empty(limit, offset);
        };
        let Some(Value::Array(entries)) = embedded.items else {
            debug!("listing has no items array; treating as empty");
            return Self::empty(limit, offset);
        };

        let mut items = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            if !entry.is_object() {
                debug!(index, "discarding non-object listing entry");
                continue;
            }
            match serde_json::from_value::<RawItem>(entry) {
                Ok(raw_item) => items.push(ResourceItem::from_raw(raw_item)),
                Err(error) => debug!(index, error = %error, "discarding malformed listing entry"),
            }
        }

        Self {
            items,
            total: embedded.total.unwrap_or(0),
            limit: embedded.limit.unwrap_or(limit),
            offset: embedded.offset.unwrap_or(offset),
        }
    }
}
