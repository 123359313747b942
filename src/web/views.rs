//! HTML pages and the URLs they link to.

use maud::{DOCTYPE, Markup, html};

use crate::api::ResourceItem;
use crate::filter::Category;
use crate::pagination::PageLinks;

use super::flash::Flash;

const STYLE: &str = "\
body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem}\
table{border-collapse:collapse;width:100%}\
td,th{padding:.3rem .5rem;border-bottom:1px solid #ddd;text-align:left}\
.flash{padding:.5rem 1rem;margin:.5rem 0;border-radius:4px}\
.danger{background:#f8d7da}.warning{background:#fff3cd}.info{background:#d1ecf1}\
.pager a{margin-right:1rem}";

/// Everything the listing page shows.
#[derive(Debug, Clone, Copy)]
pub struct FilesView<'a> {
    /// Share link being browsed.
    pub share_key: &'a str,
    /// Items on this page after category filtering.
    pub items: &'a [ResourceItem],
    /// Active category.
    pub category: Category,
    /// Current 1-based page.
    pub page: u32,
    /// Total item count reported upstream (unfiltered).
    pub total: u64,
    /// Navigation markers.
    pub links: PageLinks,
}

/// Listing URL for `share_key` at `page`, keeping the category.
#[must_use]
pub fn files_location(share_key: &str, page: u32, category: Category) -> String {
    let mut location = format!("/files?public_key={}", urlencoding::encode(share_key));
    if page > 1 {
        location.push_str(&format!("&page={page}"));
    }
    if category != Category::All {
        location.push_str(&format!("&file_type={}", category.as_param()));
    }
    location
}

/// Single-file download URL.
#[must_use]
pub fn download_location(share_key: &str, path: &str) -> String {
    format!(
        "/download?public_key={}&file_path={}",
        urlencoding::encode(share_key),
        urlencoding::encode(path)
    )
}

/// Formats a byte count with a binary unit (`1.5 KiB`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

fn layout(title: &str, flashes: &[Flash], body: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (STYLE) }
            }
            body {
                h1 { a href="/" { "Share link browser" } }
                @for flash in flashes {
                    div class=(flash.level.css_class()) role="alert" { (flash.message) }
                }
                (body)
            }
        }
    }
}

/// The link form.
#[must_use]
pub fn index_page(flashes: &[Flash]) -> Markup {
    let body = html! {
        form method="post" action="/" {
            label for="public_key" { "Public link" }
            " "
            input type="url" id="public_key" name="public_key" size="60"
                placeholder="https://disk.yandex.ru/d/..." required;
            " "
            button type="submit" { "Open" }
        }
    };
    layout("Share link browser", flashes, &body)
}

/// One page of a public resource.
#[must_use]
pub fn files_page(view: &FilesView<'_>, flashes: &[Flash]) -> Markup {
    let body = html! {
        p { "Link: " code { (view.share_key) } " (" (view.total) " items)" }

        form method="get" action="/files" {
            input type="hidden" name="public_key" value=(view.share_key);
            label for="file_type" { "Show" }
            " "
            select id="file_type" name="file_type" {
                @for category in Category::ALL {
                    option value=(category.as_param()) selected[category == view.category] {
                        (category.label())
                    }
                }
            }
            " "
            button type="submit" { "Filter" }
        }

        form method="post" action="/download_multiple" {
            input type="hidden" name="public_key" value=(view.share_key);
            @if view.items.is_empty() {
                p { "Nothing to show on this page." }
            } @else {
                table {
                    thead {
                        tr { th {} th { "Name" } th { "Type" } th { "Size" } th { "Modified" } }
                    }
                    tbody {
                        @for item in view.items {
                            tr {
                                td {
                                    @if item.is_file() {
                                        input type="checkbox" name="file_paths" value=(item.path);
                                    }
                                }
                                td {
                                    @if item.is_file() {
                                        a href=(download_location(view.share_key, &item.path)) { (item.name) }
                                    } @else {
                                        (item.name) "/"
                                    }
                                }
                                td { (item.mime_type.as_deref().unwrap_or("folder")) }
                                td { @if let Some(size) = item.size { (human_size(size)) } }
                                td { (item.modified.as_deref().unwrap_or_default()) }
                            }
                        }
                    }
                }
                p { button type="submit" { "Download selected as zip" } }
            }
        }

        nav class="pager" {
            @if let Some(prev) = view.links.prev_page {
                a href=(files_location(view.share_key, prev, view.category)) { "« Previous" }
            }
            span { "Page " (view.page) }
            @if let Some(next) = view.links.next_page {
                " "
                a href=(files_location(view.share_key, next, view.category)) { "Next »" }
            }
        }
    };
    layout("Files", flashes, &body)
}
