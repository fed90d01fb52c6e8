use serde::{Deserialize, Serialize};

/// Fixed page size for every post listing.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A 1-based page request over an ordered listing.
///
/// Page indices past the end of the data are valid requests that yield an
/// empty page, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// Build a request for the given 1-based page. Zero clamps to 1.
    pub fn new(page: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of rows to skip before this page starts. The multiply
    /// saturates: the page number comes straight from the query string, and
    /// a page past the end of the data must stay an empty page rather than
    /// wrap around into real rows.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

/// One window of an ordered listing, plus whether more data follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_next: false,
        }
    }

    /// Build a page from an over-fetched slice: callers fetch
    /// `page_size + 1` rows and the extra row, if present, proves a next
    /// page exists.
    pub fn from_overfetch(mut items: Vec<T>, page_size: u64) -> Self {
        let has_next = items.len() as u64 > page_size;
        items.truncate(page_size as usize);
        Self { items, has_next }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_next: self.has_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_clamps_zero_to_first_page() {
        let req = PageRequest::new(0);
        assert_eq!(req.page(), 1);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn page_request_offset_is_page_size_multiples() {
        let req = PageRequest::new(3);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn absurd_page_number_saturates_the_offset() {
        let req = PageRequest::new(1_844_674_407_370_955_163);
        assert_eq!(req.offset(), u64::MAX);
    }

    #[test]
    fn overfetch_detects_next_page() {
        let page = Page::from_overfetch((0..11).collect::<Vec<_>>(), 10);
        assert_eq!(page.items.len(), 10);
        assert!(page.has_next);
    }

    #[test]
    fn overfetch_exact_fit_has_no_next() {
        let page = Page::from_overfetch((0..10).collect::<Vec<_>>(), 10);
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_next);
    }
}
