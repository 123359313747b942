//! Next/previous page calculation for listing views.
//!
//! Page numbers are 1-based. Links are always derived from the upstream
//! total, never from the size of a filtered page.

use serde::Serialize;

/// Navigation markers for one listing page. `None` means "no such page".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    /// Page after the current one, if the resource has more items.
    pub next_page: Option<u32>,
    /// Page before the current one, if the current page is not the first.
    pub prev_page: Option<u32>,
}

/// Computes next/previous markers.
///
/// `next_page` exists when `offset + limit < total`; `prev_page` exists when
/// `current_page > 1`. A `current_page` of 0 is treated as 1.
///
/// # Examples
///
/// ```
/// use sharelink_core::pagination::paginate;
///
/// let links = paginate(250, 100, 100, 2);
/// assert_eq!(links.next_page, Some(3));
/// assert_eq!(links.prev_page, Some(1));
/// ```
#[must_use]
pub fn paginate(total: u64, limit: u32, offset: u32, current_page: u32) -> PageLinks {
    let current_page = current_page.max(1);
    let end = u64::from(offset) + u64::from(limit);
    PageLinks {
        next_page: (end < total).then(|| current_page.saturating_add(1)),
        prev_page: (current_page > 1).then(|| current_page - 1),
    }
}

/// Parses the `page` navigation parameter; missing, non-numeric, negative or
/// zero values fall back to 1.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Offset of the first item on `page` (1-based) for page size `limit`.
#[must_use]
pub fn offset_for_page(page: u32, limit: u32) -> u32 {
    page.max(1).saturating_sub(1).saturating_mul(limit)
}
