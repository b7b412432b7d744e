//! Paging and sort-direction primitives shared by all list queries.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Requested page; `page_number` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Missing or zero page means 1. The page number is capped so the row
    /// offset always fits a signed 64-bit SQL OFFSET.
    pub fn new(page_number: Option<u64>, page_size: Option<u64>) -> Self {
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let page_number = match page_number {
            Some(0) | None => 1,
            Some(n) => n.min(i64::MAX as u64 / page_size),
        };
        Self { page_number, page_size }
    }

    /// 0-based page index for the ORM paginator.
    pub fn index(&self) -> u64 {
        self.page_number - 1
    }

    pub fn offset(&self) -> u64 {
        self.index().saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page_number: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_number: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, req: PageRequest) -> Self {
        Self { items, total_count, page_number: req.page_number, page_size: req.page_size }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "ASC", alias = "Asc", alias = "ascending")]
    Asc,
    #[serde(alias = "DESC", alias = "Desc", alias = "descending")]
    Desc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_missing_use_defaults() {
        let p = PageRequest::new(Some(0), None);
        assert_eq!(p, PageRequest { page_number: 1, page_size: 10 });
        assert_eq!(PageRequest::new(None, None), PageRequest::default());
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(PageRequest::new(Some(3), Some(0)).page_size, 1);
        assert_eq!(PageRequest::new(Some(3), Some(1000)).page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn huge_page_number_is_capped() {
        let p = PageRequest::new(Some(u64::MAX), Some(100));
        assert_eq!(p.page_number, i64::MAX as u64 / 100);
        assert!(p.offset() <= i64::MAX as u64);
        let p = PageRequest::new(Some(u64::MAX), Some(1));
        assert!(p.offset() < i64::MAX as u64);
    }

    #[test]
    fn offset_follows_page_number() {
        let p = PageRequest::new(Some(3), Some(20));
        assert_eq!(p.index(), 2);
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<u8> = Page { items: vec![], total_count: 21, page_number: 1, page_size: 10 };
        assert_eq!(page.total_pages(), 3);
    }
}
