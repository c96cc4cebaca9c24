use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

///
/// SortDir
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

///
/// SortExpr
/// Single-field ordering applied after filtering. Rows whose values do not
/// compare (different tags, nulls) keep their key order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortExpr {
    pub field: String,
    pub dir: SortDir,
}

impl SortExpr {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDir::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDir::Desc,
        }
    }
}

///
/// PageRequest
/// Zero-based page index plus page size. A zero size falls back to the
/// default rather than returning an unbounded result.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self::new(0, size)
    }

    #[must_use]
    pub const fn effective_size(self) -> u32 {
        if self.size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.size
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

///
/// Page
/// One page of results plus the envelope the wire layer returns verbatim.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: request.page,
            size: request.effective_size(),
        }
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total.div_ceil(u64::from(self.size))
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_falls_back_to_default() {
        assert_eq!(PageRequest::new(0, 0).effective_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(0, 5).effective_size(), 5);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::<u8> {
            items: vec![],
            total: 21,
            page: 0,
            size: 10,
        };
        assert_eq!(page.total_pages(), 3);
    }
}
