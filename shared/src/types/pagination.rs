//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Case-insensitive; anything other than `asc` sorts descending
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    /// SQL keyword
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Pagination and sort parameters for list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (0-indexed)
    pub page: u32,

    /// Number of items per page
    pub size: u32,

    /// Field to sort on, in the camelCase used by the JSON payloads
    pub sort_by: String,

    /// Sort direction
    pub sort_dir: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_dir: SortDirection::Desc,
        }
    }
}

impl PageRequest {
    /// Create a page request; size is clamped to `1..=100`
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            ..Default::default()
        }
    }

    /// Build from optional query values, applying defaults
    pub fn from_parts(
        page: Option<u32>,
        size: Option<u32>,
        sort_by: Option<&str>,
        sort_dir: Option<&str>,
    ) -> Self {
        let mut request = Self::new(page.unwrap_or(0), size.unwrap_or(DEFAULT_PAGE_SIZE));
        if let Some(field) = sort_by.filter(|f| !f.trim().is_empty()) {
            request.sort_by = field.trim().to_string();
        }
        if let Some(dir) = sort_dir {
            request.sort_dir = SortDirection::parse(dir);
        }
        request
    }

    /// Replace the sort field and direction
    pub fn sorted_by(mut self, field: impl Into<String>, dir: SortDirection) -> Self {
        self.sort_by = field.into();
        self.sort_dir = dir;
        self
    }

    /// Offset for database queries
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Limit for database queries
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Create a page from the items of `request` and the overall total
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size,
            total_items,
            total_pages: total_pages(total_items, request.size),
        }
    }

    /// Slice an in-memory collection that is already filtered and sorted
    pub fn from_vec(all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();
        Self::new(items, request, total)
    }

    /// Transform the items using a function
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn total_pages(total: u64, size: u32) -> u32 {
    if total == 0 || size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(size)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse(" asc "), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Desc);
    }

    #[test]
    fn test_page_request_defaults_and_clamp() {
        let request = PageRequest::from_parts(None, None, None, None);
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 10);
        assert_eq!(request.sort_by, "createdAt");
        assert_eq!(request.sort_dir, SortDirection::Desc);

        let request = PageRequest::from_parts(Some(2), Some(500), Some("title"), Some("asc"));
        assert_eq!(request.size, 100);
        assert_eq!(request.offset(), 200);
        assert_eq!(request.sort_by, "title");
        assert_eq!(request.sort_dir, SortDirection::Asc);

        assert_eq!(PageRequest::new(0, 0).size, 1);
    }

    #[test]
    fn test_page_from_vec() {
        let request = PageRequest::new(1, 3);
        let page = Page::from_vec((1..=7).collect::<Vec<_>>(), &request);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_items, 7);
        assert_eq!(page.total_pages, 3);

        let empty: Page<i32> = Page::from_vec(vec![], &request);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.is_empty());
    }
}
