// ── Pagination ──
//
// Derived, never stored: the page numbers come from offset, total and the
// fixed page size every time they are needed.

/// Items per page. Fixed; the list endpoint is always asked for this many.
pub const PAGE_SIZE: u32 = 20;

/// Pagination view over an offset/limit cursor and a total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(offset: u64, limit: u32, total: u64) -> Self {
        Self {
            offset,
            limit: limit.max(1),
            total,
        }
    }

    fn limit(self) -> u64 {
        u64::from(self.limit)
    }

    /// 1-based page number containing `offset`.
    pub fn current_page(self) -> u64 {
        self.offset / self.limit() + 1
    }

    /// `ceil(total / limit)`; zero when there are no items.
    pub fn total_pages(self) -> u64 {
        self.total.div_ceil(self.limit())
    }

    pub fn has_previous(self) -> bool {
        self.current_page() > 1
    }

    pub fn has_next(self) -> bool {
        self.current_page() < self.total_pages()
    }

    /// Offset of the previous page, if there is one.
    pub fn previous_offset(self) -> Option<u64> {
        self.has_previous()
            .then(|| self.offset.saturating_sub(self.limit()))
    }

    /// Offset of the next page, if there is one.
    pub fn next_offset(self) -> Option<u64> {
        self.has_next().then(|| self.offset + self.limit())
    }

    /// Offset of the last page, or 0 when empty.
    pub fn last_page_offset(self) -> u64 {
        self.total_pages().saturating_sub(1) * self.limit()
    }

    /// Pagination controls are hidden when there is nothing to page through.
    pub fn is_visible(self) -> bool {
        self.total > 0
    }

    /// `"Page X of Y"`
    pub fn label(self) -> String {
        format!("Page {} of {}", self.current_page(), self.total_pages())
    }
}
