use crate::error::PageError;

/// A window over an aggregation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    pub index: usize,
    pub total_pages: usize,
}

impl<T> PageView<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.index > 1
    }

    pub fn has_next(&self) -> bool {
        self.index < self.total_pages
    }
}

/// Number of pages needed to show `len` items, zero when there is nothing.
///
/// A zero page size has no pages at all.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Select page `index` (1-based) of `items`.
///
/// An empty result has zero pages but page 1 is still valid and yields an
/// empty slice, so callers can render an empty state without special casing.
pub fn page<T>(items: &[T], page_size: usize, index: usize) -> Result<PageView<'_, T>, PageError> {
    if page_size == 0 {
        return Err(PageError::ZeroPageSize);
    }

    let total_pages = total_pages(items.len(), page_size);
    if index < 1 || index > total_pages.max(1) {
        return Err(PageError::InvalidPage { index, total_pages });
    }

    let start = ((index - 1) * page_size).min(items.len());
    let end = (index * page_size).min(items.len());

    Ok(PageView {
        items: &items[start..end],
        index,
        total_pages,
    })
}
