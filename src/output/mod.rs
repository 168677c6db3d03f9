//! Output module
//!
//! Hands fetched records to downstream consumers.
//!
//! # Overview
//!
//! This module provides:
//! - `RecordSink` - the consumer interface records are emitted to
//! - `JsonLinesSink` - one `{"response": ...}` JSON object per line
//! - `CollectSink` - in-memory collection
//! - `CloudDestination` / `ObjectStoreSink` - JSON lines written to cloud
//!   storage (S3, R2, GCS, Azure) or a local directory

mod cloud;
mod sink;

pub use cloud::{build_partitioned_path, CloudDestination, ObjectStoreSink};
pub use sink::{CollectSink, JsonLinesSink, RecordSink};

use crate::error::Result;

/// Open the sink for an output destination
///
/// `None` or `-` writes JSON lines to stdout.
pub fn open_sink(destination: Option<&str>) -> Result<Box<dyn RecordSink>> {
    match destination {
        None | Some("-") => Ok(Box::new(JsonLinesSink::stdout())),
        Some(url) => Ok(Box::new(ObjectStoreSink::new(CloudDestination::parse(url)?))),
    }
}

#[cfg(test)]
mod tests;
