// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # fanout-fetch
//!
//! Fetch a parameterized set of HTTP endpoints and emit every response as a
//! record for downstream processing.
//!
//! ## Features
//!
//! - **Parameter Fan-out**: One fetch unit per value of a parameter file
//!   (JSON array or CSV) read from GCS, S3, R2, Azure or local disk
//! - **URL Templates**: `${param}` substitution into a URL template
//! - **Fixed-count Pagination**: `&page=1..=max_pages` per parameter, in order
//! - **Opaque Records**: Each response body is emitted as `{"response": ...}`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fanout_fetch::{config::JobConfig, engine::run_job, output::CollectSink, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = JobConfig::new(
//!         "https://api.example.com/items?id=${param}",
//!         "gs://my-bucket/params.json",
//!     )
//!     .with_pagination("page", 3);
//!
//!     let mut sink = CollectSink::new();
//!     let stats = run_job(&config, &mut sink).await?;
//!     println!("{} records", stats.records_emitted);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   Vec<String>   ┌───────────────────────────────────┐
//! │   loader     │ ──────────────► │ engine::Job (bounded fan-out)     │
//! │ gs/s3/az/fs  │                 │   unit per param ─► Fetcher       │
//! └──────────────┘                 │   page 1..=N, sequential GETs     │
//!                                  └────────────────┬──────────────────┘
//!                                                   │ OutputRecord
//!                                          ┌────────▼────────┐
//!                                          │  output sinks   │
//!                                          │ stdout / cloud  │
//!                                          └─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Job configuration
pub mod config;

/// URL template substitution
pub mod template;

/// Fixed-count page number pagination
pub mod pagination;

/// HTTP client
pub mod http;

/// Parameter list loading
pub mod loader;

/// Per-parameter fetching and fan-out
pub mod engine;

/// Record sinks and output destinations
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::JobConfig;
pub use engine::{run_job, Fetcher, Job, JobStats};
pub use loader::load_params;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
