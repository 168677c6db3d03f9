//! Pagination types

use serde::{Deserialize, Serialize};

/// Page number pagination settings
///
/// Only constructed when pagination is enabled, so `max_pages` is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSettings {
    /// Query parameter name for the page number (e.g., "page")
    pub page_param: String,
    /// Number of pages requested per parameter
    pub max_pages: u32,
}

impl PageSettings {
    /// Create page settings
    ///
    /// Returns `None` when `max_pages` is zero, which disables pagination.
    pub fn new(page_param: impl Into<String>, max_pages: u32) -> Option<Self> {
        (max_pages >= 1).then(|| Self {
            page_param: page_param.into(),
            max_pages,
        })
    }

    /// Build settings from the optional config fields
    ///
    /// Pagination is enabled iff both fields are present and `max_pages >= 1`.
    pub fn from_parts(page_param: Option<&str>, max_pages: Option<u32>) -> Option<Self> {
        match (page_param, max_pages) {
            (Some(name), Some(max)) if !name.is_empty() => Self::new(name, max),
            _ => None,
        }
    }
}
