//! Page/page-size handling for listing results.

use serde::Serialize;

/// Page size used when the request does not provide a usable one.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Largest page size a request may ask for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A normalized, 1-based page request.
///
/// Construction never fails: out-of-range or malformed values are clamped or
/// replaced by defaults, so `offset()` is never negative and `page_size` is
/// never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Creates a request, clamping `page` to at least 1 and `page_size` to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Builds a request from raw query-string values.
    ///
    /// # Defaults
    ///
    /// - `page`: 1 when absent or not a number; values below 1 become 1
    /// - `page_size`: `default_size` when absent, not a number, or not positive;
    ///   values above [`MAX_PAGE_SIZE`] are clamped
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>, default_size: u32) -> Self {
        let page = page
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(|p| u32::try_from(p.max(1)).unwrap_or(u32::MAX))
            .unwrap_or(1);

        let page_size = page_size
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|size| *size > 0)
            .map(|size| u32::try_from(size).unwrap_or(MAX_PAGE_SIZE))
            .unwrap_or(default_size);

        Self::new(page, page_size)
    }

    /// Number of records to skip: `(page - 1) * page_size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Maximum number of records in the page.
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Total number of pages for `total_count` records; 0 when there are none.
    pub fn total_pages(&self, total_count: u64) -> u64 {
        total_count.div_ceil(u64::from(self.page_size))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a listing together with the totals of the whole result.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Assembles a page from items already sliced by the store.
    pub fn from_parts(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            total_pages: request.total_pages(total_count),
            current_page: request.page,
            page_size: request.page_size,
        }
    }

    /// Converts the items while keeping the totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}

/// Slices an already filtered and ordered result into the requested page.
///
/// A page beyond the last one yields no items; it is not an error.
pub fn paginate<T>(records: Vec<T>, request: PageRequest) -> Page<T> {
    let total_count = records.len() as u64;
    let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);

    let items = records.into_iter().skip(skip).take(take).collect();

    Page::from_parts(items, total_count, request)
}
