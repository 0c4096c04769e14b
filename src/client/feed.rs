//! Linear paging over a loaded poem list.

/// Poems shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 1;

/// Previous/next cursor over a list of `total` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPager {
    page_size: usize,
    page: usize,
}

impl Default for FeedPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl FeedPager {
    /// A pager at the first page. A zero page size is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1), page: 0 }
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based page index.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// The slice of `items` on the current page.
    #[must_use]
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub fn has_next(&self, total: usize) -> bool {
        self.page + 1 < self.page_count(total)
    }

    /// Advance one page. Returns false at the end.
    pub fn next(&mut self, total: usize) -> bool {
        if !self.has_next(total) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page. Returns false at the start.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Pull the cursor back inside a list that shrank to `total` items.
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total).saturating_sub(1));
    }
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
