//! Paginated fetcher for a single parameter value

use crate::config::JobConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::{self, PageSettings, PageUrls};
use crate::template;
use crate::types::OutputRecord;
use futures::stream::{self, Stream};
use tracing::{debug, warn};

/// Fetches every page for one parameter value
///
/// Stateless apart from the read-only template and pagination settings, so
/// a single fetcher is shared by all units of a job.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: HttpClient,
    url_template: String,
    pages: Option<PageSettings>,
}

impl Fetcher {
    /// Create a fetcher
    pub fn new(
        client: HttpClient,
        url_template: impl Into<String>,
        pages: Option<PageSettings>,
    ) -> Self {
        Self {
            client,
            url_template: url_template.into(),
            pages,
        }
    }

    /// Create a fetcher from a job config
    pub fn from_config(config: &JobConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.http_config())?;
        Ok(Self::new(
            client,
            config.url_template.clone(),
            config.pagination(),
        ))
    }

    /// Every URL `process` requests for this parameter, in order
    pub fn request_urls(&self, param: &str) -> Vec<String> {
        pagination::request_urls(&self.url_template, param, self.pages.as_ref())
    }

    fn page_urls(&self, param: &str) -> PageUrls {
        let base_url = template::substitute(&self.url_template, param);
        PageUrls::new(base_url, self.pages.clone())
    }

    /// Fetch all pages for one parameter value
    ///
    /// The returned stream is lazy: a request is only sent when the next
    /// item is polled, so page N+1 is never requested before page N's body
    /// has been read. Yields one record per successful response, in page
    /// order. The first failed request is yielded as an error and ends the
    /// stream; later pages are not requested.
    pub fn process(&self, param: &str) -> impl Stream<Item = Result<OutputRecord>> + Send + 'static {
        let client = self.client.clone();
        let urls = self.page_urls(param);
        let param = param.to_string();

        stream::unfold(Some((client, urls, param)), |state| async move {
            let (client, mut urls, param) = state?;
            let (page, url) = urls.next()?;

            debug!(param = %param, page = ?page, "GET {url}");

            match client.get_text(&url).await {
                Ok(body) => Some((Ok(OutputRecord::new(body)), Some((client, urls, param)))),
                Err(e) => {
                    warn!(param = %param, page = ?page, "Request failed: {e}");
                    Some((Err(e), None))
                }
            }
        })
    }
}
