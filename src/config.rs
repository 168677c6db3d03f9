//! Job configuration
//!
//! A job is described by a URL template, the location of a parameter file and
//! optional pagination settings. Configuration is loaded from YAML or JSON
//! (see [`JobConfig::from_file`]) and/or assembled from CLI flags, validated
//! once, and read-only afterwards.
//!
//! ```yaml
//! url_template: "https://api.example.com/items?id=${param}"
//! params_path: "gs://my-bucket/params.json"
//! pagination_param: page
//! max_pages: 3
//! concurrency: 8
//! ```
//!
//! The camelCase names (`apiTemplate`, `paramsFilePath`,
//! `paginationParam`, `maxPages`) are accepted as aliases.

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::pagination::PageSettings;
use crate::template;
use crate::types::ParamsFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Default number of parameters fetched concurrently
pub const DEFAULT_CONCURRENCY: usize = 4;

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

/// Complete job configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    /// URL template containing the `${param}` placeholder
    #[serde(default, alias = "urlTemplate", alias = "apiTemplate")]
    pub url_template: String,

    /// Location of the parameter file (gs://, s3://, r2://, az://, local path)
    #[serde(default, alias = "paramsFilePath", alias = "parameterSourceLocation")]
    pub params_path: String,

    /// Query parameter name for the page number
    #[serde(
        default,
        alias = "paginationParam",
        alias = "paginationParameterName"
    )]
    pub pagination_param: Option<String>,

    /// Number of pages requested per parameter
    #[serde(default, alias = "maxPages")]
    pub max_pages: Option<u32>,

    /// Parameter file format (inferred from the extension when absent)
    #[serde(default, alias = "paramsFormat")]
    pub params_format: Option<ParamsFormat>,

    /// Maximum number of parameters fetched at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout in seconds (None = client default)
    #[serde(default, alias = "timeoutSecs")]
    pub timeout_secs: Option<u64>,

    /// Abort the whole job on the first failed parameter
    #[serde(default, alias = "failFast")]
    pub fail_fast: bool,

    /// Output destination (local path or cloud URL); stdout when absent
    #[serde(default)]
    pub output: Option<String>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            url_template: String::new(),
            params_path: String::new(),
            pagination_param: None,
            max_pages: None,
            params_format: None,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: None,
            fail_fast: false,
            output: None,
        }
    }
}

impl JobConfig {
    /// Create a config with the two required fields
    pub fn new(url_template: impl Into<String>, params_path: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            params_path: params_path.into(),
            ..Default::default()
        }
    }

    /// Enable pagination
    #[must_use]
    pub fn with_pagination(mut self, page_param: impl Into<String>, max_pages: u32) -> Self {
        self.pagination_param = Some(page_param.into());
        self.max_pages = Some(max_pages);
        self
    }

    /// Set concurrency
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the parameter file format
    #[must_use]
    pub fn with_params_format(mut self, format: ParamsFormat) -> Self {
        self.params_format = Some(format);
        self
    }

    /// Set fail fast mode
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set request timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Load a config file
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the configuration
    ///
    /// Runs before any work starts. A config that fails validation never
    /// loads parameters or issues requests.
    pub fn validate(&self) -> Result<()> {
        // URLs are only parsed per request; a parameter may supply the whole URL
        template::validate(&self.url_template)?;

        if self.params_path.trim().is_empty() {
            return Err(Error::missing_field("params_path"));
        }

        if self.max_pages == Some(0) {
            return Err(Error::invalid_value(
                "max_pages",
                "must be a positive integer",
            ));
        }

        if matches!(self.pagination_param.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(Error::invalid_value(
                "pagination_param",
                "must not be empty",
            ));
        }

        if self.concurrency == 0 {
            return Err(Error::invalid_value("concurrency", "must be at least 1"));
        }

        match (&self.pagination_param, self.max_pages) {
            (Some(name), None) => {
                warn!("pagination_param '{name}' set without max_pages; pagination disabled");
            }
            (None, Some(max)) => {
                warn!("max_pages {max} set without pagination_param; pagination disabled");
            }
            _ => {}
        }

        Ok(())
    }

    /// Pagination settings, if pagination is enabled
    pub fn pagination(&self) -> Option<PageSettings> {
        PageSettings::from_parts(self.pagination_param.as_deref(), self.max_pages)
    }

    /// Whether pagination is enabled
    pub fn is_paginated(&self) -> bool {
        self.pagination().is_some()
    }

    /// Resolved parameter file format
    pub fn params_format(&self) -> ParamsFormat {
        self.params_format
            .unwrap_or_else(|| ParamsFormat::from_location(&self.params_path))
    }

    /// HTTP client configuration for this job
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout_secs(self.timeout_secs)
            .build()
    }
}
