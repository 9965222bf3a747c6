#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// A single page of results needs no pager.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}

/// `min(ceil(total_results / page_size), max_pages)`.
pub fn total_pages(total_results: u64, page_size: u32, max_pages: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_results.div_ceil(u64::from(page_size));
    u32::try_from(pages.min(u64::from(max_pages))).unwrap_or(max_pages)
}
