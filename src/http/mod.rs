//! HTTP client module
//!
//! Provides the GET client used by the fetcher.
//!
//! # Features
//!
//! - **Fixed User-Agent**: every request sends `User-Agent: Mozilla/5.0`
//! - **Text Bodies**: responses are read whole, as text, never parsed
//! - **Status Classification**: non-2xx responses become `Error::HttpStatus`
//!
//! There are no retries and no rate limiting: a failed request is reported
//! to the caller as-is.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, USER_AGENT};
