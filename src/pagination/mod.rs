//! Pagination module
//!
//! Supports: fixed-count page number pagination
//!
//! # Overview
//!
//! Pagination is enabled when both a page parameter name and a page count
//! are configured. Every parameter then requests pages `1..=max_pages`, in
//! ascending order, regardless of what earlier pages returned. There is no
//! stop condition: an empty page does not end pagination early.

mod pages;
mod types;

pub use pages::{request_urls, PageUrls};
pub use types::PageSettings;
