//! Pagination over the filtered character list.
//!
//! - `paginate` slices one page out of a list, never failing
//! - `Pager` tracks the current page with bounds-checked navigation
//! - `PageWindow` describes the numbered page strip shown around the
//!   current page

/// Characters shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page numbers shown in the numbered strip
const WINDOW_WIDTH: usize = 5;

/// One page of a list, plus the page count of the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    pub visible: &'a [T],
    pub total_pages: usize,
}

/// `ceil(len / page_size)`, at least 1. A page size of 0 counts as 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice page `page` (1-based) out of `items`.
///
/// Pages past the end, and page 0, yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> PageSlice<'_, T> {
    let page_size = page_size.max(1);
    let start = page
        .checked_sub(1)
        .map(|zero_based| zero_based.saturating_mul(page_size));

    let visible = match start {
        Some(start) if start < items.len() => {
            let end = start.saturating_add(page_size).min(items.len());
            &items[start..end]
        }
        _ => &[],
    };

    PageSlice {
        visible,
        total_pages: total_pages(items.len(), page_size),
    }
}

/// Current page plus page count, with bounds-checked navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    total_pages: usize,
}

impl Pager {
    pub fn new(total_pages: usize) -> Self {
        Self {
            page: 1,
            total_pages: total_pages.max(1),
        }
    }

    pub fn for_items(len: usize, page_size: usize) -> Self {
        Self::new(total_pages(len, page_size))
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Advance one page. No-op on the last page; returns whether it moved.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. No-op on the first page; returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped into `1..=total_pages`
    pub fn go_to(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.total_pages);
        self.page
    }

    /// Back to page 1 with a new page count
    pub fn reset(&mut self, total_pages: usize) {
        *self = Self::new(total_pages);
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::around(self.page, self.total_pages)
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(1)
    }
}

/// The numbered page strip.
///
/// At most five page numbers centred on the current page, plus jump
/// targets for the first and last page when they fall outside the strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Jump to page 1, shown once the current page is past 3
    pub first: Option<usize>,
    /// Gap marker between the first-page jump and the strip
    pub leading_gap: bool,
    pub pages: Vec<usize>,
    /// Jump to the last page, shown while it is more than 2 pages away
    pub last: Option<usize>,
    /// Gap marker between the strip and the last-page jump
    pub trailing_gap: bool,
}

impl PageWindow {
    pub fn around(current: usize, total_pages: usize) -> Self {
        let total = total_pages.max(1);
        let current = current.clamp(1, total);

        let (low, high) = if current <= 3 {
            (1, WINDOW_WIDTH)
        } else if current + 2 >= total {
            (total.saturating_sub(WINDOW_WIDTH - 1), total)
        } else {
            (current - 2, current + 2)
        };
        let pages: Vec<usize> = (low.max(1)..=high.min(total)).collect();

        let first = (current > 3 && !pages.contains(&1)).then_some(1);
        let last = (current + 2 < total && !pages.contains(&total)).then_some(total);

        Self {
            first,
            leading_gap: current > 4 && first.is_some(),
            pages,
            last,
            trailing_gap: current + 3 < total && last.is_some(),
        }
    }
}
