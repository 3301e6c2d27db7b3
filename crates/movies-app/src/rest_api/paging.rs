use garde::Validate;
use movies_dal::{filter::empty_string_as_none, Pageable};

use crate::error::ApiResult;

/// Paging parameters as received in query string, missing values fall back to defaults
#[derive(Debug, Clone, Default, Validate, serde::Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi",into_params(parameter_in = Query))]
#[garde(allow_unvalidated)]
pub struct Paging {
    /// 1-based page number, values below 1 are treated as 1
    #[serde(default, deserialize_with = "empty_string_as_none")]
    page: Option<i64>,
    /// Number of items per page, must be positive
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[garde(range(min = 1))]
    size: Option<i64>,
}

impl Paging {
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Paging { page, size }
    }

    pub fn into_pageable(self, default_page_size: u32) -> ApiResult<Pageable> {
        let page = self.page.unwrap_or(1);
        let size = self.size.unwrap_or(default_page_size.into());
        Ok(Pageable::new(page, size)?)
    }
}
