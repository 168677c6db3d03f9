//! Page URL generation

use super::types::PageSettings;
use crate::template;

/// Iterator over the request URLs of a single fetch unit
///
/// Yields the base URL once when pagination is disabled, otherwise one URL
/// per page in ascending page order.
#[derive(Debug, Clone)]
pub struct PageUrls {
    base_url: String,
    pages: Option<PageSettings>,
    next_page: u32,
    done: bool,
}

impl PageUrls {
    /// Create a page URL iterator for a resolved base URL
    pub fn new(base_url: impl Into<String>, pages: Option<PageSettings>) -> Self {
        Self {
            base_url: base_url.into(),
            pages,
            next_page: 1,
            done: false,
        }
    }

    /// Number of requests this unit issues when every request succeeds
    pub fn request_count(&self) -> usize {
        self.pages.as_ref().map_or(1, |p| p.max_pages as usize)
    }
}

impl Iterator for PageUrls {
    /// (page number, url); the page number is `None` without pagination
    type Item = (Option<u32>, String);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match &self.pages {
            None => {
                self.done = true;
                Some((None, self.base_url.clone()))
            }
            Some(settings) => {
                let page = self.next_page;
                if page >= settings.max_pages {
                    self.done = true;
                } else {
                    self.next_page += 1;
                }
                Some((
                    Some(page),
                    template::page_url(&self.base_url, &settings.page_param, page),
                ))
            }
        }
    }
}

/// All request URLs for one parameter value, in request order
pub fn request_urls(url_template: &str, param: &str, pages: Option<&PageSettings>) -> Vec<String> {
    let base = template::substitute(url_template, param);
    PageUrls::new(base, pages.cloned())
        .map(|(_, url)| url)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_at_u32_max() {
        let mut urls = PageUrls {
            base_url: "https://x.test/?id=1".to_string(),
            pages: PageSettings::new("page", u32::MAX),
            next_page: u32::MAX,
            done: false,
        };

        let (page, url) = urls.next().unwrap();
        assert_eq!(page, Some(u32::MAX));
        assert_eq!(url, format!("https://x.test/?id=1&page={}", u32::MAX));
        assert!(urls.next().is_none());
        assert!(urls.next().is_none());
    }
}
