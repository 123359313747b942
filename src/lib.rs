//! Sharelink Core Library
//!
//! This library backs the sharelink web tool, which lets a user paste a
//! public cloud-disk share link, browse the resource page by page and
//! download single files or a zip bundle of several files.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`link`] - Share link validation (fail-fast gate before any network call)
//! - [`api`] - Public resource API client, upstream schemas and errors
//! - [`cache`] - Time-boxed memoization of listing responses
//! - [`filter`] - Coarse file category filtering
//! - [`pagination`] - Next/previous page calculation
//! - [`download`] - Download resolver and zip archive bundler
//! - [`config`] - Runtime configuration and validation
//! - [`web`] - HTTP routes and HTML views

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod cache;
pub mod config;
pub mod download;
pub mod filter;
pub mod link;
pub mod pagination;
mod user_agent;
pub mod web;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use api::{ApiError, FetchedContent, ListingPage, PublicApiClient, PublicResourceApi, ResourceItem, ResourceKind};
pub use cache::{CachedListing, TtlCache};
pub use config::{AppConfig, ConfigError};
pub use download::{
    ArchiveBundler, ArchiveError, ArchiveResult, ArchiveWarning, DownloadResolver, DownloadedFile,
    ResolveError, ResolveStage,
};
pub use filter::{Category, filter_items};
pub use link::{LinkValidator, is_valid_share_link};
pub use pagination::{PageLinks, paginate, parse_page};
pub use web::{AppState, SetupError, router};
