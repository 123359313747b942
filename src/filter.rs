//! Coarse file category filtering of a listing page.
//!
//! Filtering happens per page, after the upstream call, so a filtered page
//! can legitimately hold fewer than `limit` items. Pagination is always
//! derived from the unfiltered upstream total.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::api::ResourceItem;

/// Mime types counted as documents (matched case-insensitively).
pub const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.oasis.opendocument.text",
    "application/vnd.oasis.opendocument.spreadsheet",
    "application/vnd.oasis.opendocument.presentation",
    "application/rtf",
];

/// File category selected in the listing view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// No filtering; folders included.
    #[default]
    All,
    /// Files whose mime type starts with `image/`.
    Image,
    /// Files whose mime type is in [`DOCUMENT_MIME_TYPES`].
    Document,
    /// Files that are neither images nor documents.
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::All,
        Category::Image,
        Category::Document,
        Category::Other,
    ];

    /// Query-string value (`""` for [`Category::All`]).
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Image => "image",
            Self::Document => "document",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Image => "Images",
            Self::Document => "Documents",
            Self::Other => "Other",
        }
    }

    /// Parses a query value leniently: empty or unknown values mean
    /// [`Category::All`].
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Returns true when `item` belongs to this category.
    #[must_use]
    pub fn matches(self, item: &ResourceItem) -> bool {
        if self == Self::All {
            return true;
        }
        if !item.is_file() {
            return false;
        }
        let mime = item.mime_lowercase();
        match self {
            Self::All => true,
            Self::Image => is_image(&mime),
            Self::Document => is_document(&mime),
            Self::Other => !is_image(&mime) && !is_document(&mime),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognized category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown file category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "image" | "images" => Ok(Self::Image),
            "document" | "documents" => Ok(Self::Document),
            "other" => Ok(Self::Other),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

fn is_image(mime_lowercase: &str) -> bool {
    mime_lowercase.starts_with("image/")
}

fn is_document(mime_lowercase: &str) -> bool {
    DOCUMENT_MIME_TYPES
        .iter()
        .any(|doc| doc.eq_ignore_ascii_case(mime_lowercase))
}

/// Keeps the items of `items` that belong to `category`, preserving order.
#[must_use]
pub fn filter_items(items: Vec<ResourceItem>, category: Category) -> Vec<ResourceItem> {
    if category == Category::All {
        return items;
    }
    let before = items.len();
    let kept: Vec<ResourceItem> = items
        .into_iter()
        .filter(|item| category.matches(item))
        .collect();
    debug!(%category, before, after = kept.len(), "filtered listing page");
    kept
}
