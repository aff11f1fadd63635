use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 8;

/// A page-sized window over a list. The page never goes below zero, but may run past the end of
/// the list, in which case the window is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    size: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageWindow {
    pub fn new(size: usize) -> Self {
        Self {
            page: 0,
            size: size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Move by `delta` pages, clamping at page 0.
    pub fn shift(&mut self, delta: i64) {
        let next = i64::try_from(self.page)
            .unwrap_or(i64::MAX)
            .saturating_add(delta);
        self.page = usize::try_from(next.max(0)).unwrap_or(usize::MAX);
    }

    /// Indices covered by the window, clipped to a list of `len` items.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = self.page.saturating_mul(self.size).min(len);
        let end = start.saturating_add(self.size).min(len);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    /// Number of pages needed for `len` items (at least one).
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.size).max(1)
    }
}
