//! Offset pagination with a fixed page size.

use serde::Serialize;

/// Rows per page on every list view.
pub const PAGE_SIZE: i64 = 7;

/// Last valid 1-indexed page. An empty result set still has page 1.
pub fn last_page(total_count: i64, page_size: i64) -> i64 {
    let pages = (total_count.max(0) + page_size - 1) / page_size;
    pages.max(1)
}

/// Clamp `page` into `[1, last_page]`.
pub fn clamp_page(page: i64, total_count: i64, page_size: i64) -> i64 {
    page.clamp(1, last_page(total_count, page_size))
}

/// Row offset of the first item on `page`.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1) * page_size
}

/// One page of rows together with the total count of the filtered set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
}

impl<T> Page<T> {
    pub fn last_page(&self) -> i64 {
        last_page(self.total_count, self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page()
    }

    /// 1-based position of the first row on this page, 0 when empty.
    pub fn first_item(&self) -> i64 {
        if self.items.is_empty() {
            0
        } else {
            page_offset(self.page, self.page_size) + 1
        }
    }

    /// 1-based position of the last row on this page, 0 when empty.
    pub fn last_item(&self) -> i64 {
        if self.items.is_empty() {
            0
        } else {
            page_offset(self.page, self.page_size) + self.items.len() as i64
        }
    }
}
