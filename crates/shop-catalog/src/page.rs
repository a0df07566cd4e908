//! Fixed-size page arithmetic.

use std::ops::Range;

pub const PAGE_SIZE: usize = 10;

/// Number of pages for `count` items. An empty result still has one
/// (empty) page so the current page never drops below 1.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Index range of `page` within a list of `count` items.
pub fn page_range(page: usize, count: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(count);
    let end = start.saturating_add(PAGE_SIZE).min(count);
    start..end
}
