use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Which slice of a result set to return, page is 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pageable {
    page: u32,
    size: u32,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pageable {
    /// Page below 1 is clamped to 1, size must be positive.
    /// Neither has an upper bound, pages past the end are just empty.
    pub fn new(page: i64, size: i64) -> Result<Self> {
        if size < 1 {
            return Err(Error::InvalidPageSize(size));
        }
        let size = u32::try_from(size).unwrap_or(u32::MAX);
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn skip(&self) -> u64 {
        (self.page as u64 - 1).saturating_mul(self.size as u64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Takes whole matching set and keeps just the requested slice, order is preserved
    pub fn paginate(items: Vec<T>, pageable: &Pageable) -> Self {
        let total = items.len() as u64;
        let skip = usize::try_from(pageable.skip()).unwrap_or(usize::MAX);
        let content = items
            .into_iter()
            .skip(skip)
            .take(pageable.size as usize)
            .collect();
        Page {
            content,
            page: pageable.page,
            size: pageable.size,
            total,
            total_pages: total.div_ceil(pageable.size as u64),
        }
    }
}
