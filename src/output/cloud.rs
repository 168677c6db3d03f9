//! Cloud storage output support (S3, R2, GCS, Azure)

use super::sink::RecordSink;
use crate::error::{Error, Result};
use crate::types::OutputRecord;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;
use tracing::info;

/// Build a Hive-style partitioned path for an output file
///
/// Format: `dt={YYYY-MM-DD}/responses-{YYYYMMDDTHHMMSSZ}.jsonl`
///
/// The timestamp keeps repeated runs on the same day from overwriting
/// each other.
pub fn build_partitioned_path(now: DateTime<Utc>) -> String {
    format!(
        "dt={}/responses-{}.jsonl",
        now.format("%Y-%m-%d"),
        now.format("%Y%m%dT%H%M%SZ")
    )
}

/// Cloud storage destination parsed from URL
#[derive(Debug, Clone)]
pub struct CloudDestination {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// URL scheme for logging
    scheme: String,
}

impl CloudDestination {
    /// Parse a destination URL and create appropriate object store
    ///
    /// Supported formats:
    /// - `s3://bucket/path/` - AWS S3
    /// - `r2://bucket/path/` - Cloudflare R2 (S3-compatible)
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `az://container/path/` - Azure Blob Storage
    /// - `/local/path/` or `./path/` - Local filesystem
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("s3://") {
            Self::parse_s3(url, false)
        } else if url.starts_with("r2://") {
            Self::parse_s3(url, true)
        } else if let Some(rest) = url.strip_prefix("gs://") {
            let (bucket, prefix) = split_prefix(rest);
            let store = GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()
                .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;
            Ok(Self::with_store(Arc::new(store), prefix, "gs"))
        } else if let Some(rest) = url.strip_prefix("az://") {
            let (container, prefix) = split_prefix(rest);
            let store = MicrosoftAzureBuilder::from_env()
                .with_container_name(container)
                .build()
                .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;
            Ok(Self::with_store(Arc::new(store), prefix, "az"))
        } else {
            Self::parse_local(url)
        }
    }

    /// Use an existing object store
    pub fn with_store(
        store: Arc<dyn ObjectStore>,
        prefix: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            scheme: scheme.into(),
        }
    }

    /// Parse S3 or R2 URL
    fn parse_s3(url: &str, is_r2: bool) -> Result<Self> {
        let scheme = if is_r2 { "r2" } else { "s3" };
        let without_scheme = url
            .strip_prefix(&format!("{scheme}://"))
            .ok_or_else(|| Error::config(format!("Invalid {scheme} URL: {url}")))?;
        let (bucket, prefix) = split_prefix(without_scheme);

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        // AWS_ENDPOINT is read by from_env(); R2 may also set R2_ENDPOINT_URL
        if is_r2 {
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create {scheme} client: {e}")))?;

        Ok(Self::with_store(Arc::new(store), prefix, scheme))
    }

    /// Parse local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self::with_store(Arc::new(store), String::new(), "file"))
    }

    /// Get the scheme (s3, r2, gs, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Write bytes to a file in the destination
    pub async fn write(&self, filename: &str, data: Bytes) -> Result<String> {
        let path = if self.prefix.is_empty() {
            ObjectPath::from(filename)
        } else {
            ObjectPath::from(format!("{}/{filename}", self.prefix.trim_end_matches('/')))
        };

        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| Error::output(format!("Failed to write {path}: {e}")))?;

        Ok(format!("{}://{path}", self.scheme))
    }
}

/// Split `bucket/prefix/...` into bucket and prefix
fn split_prefix(rest: &str) -> (&str, String) {
    match rest.split_once('/') {
        Some((bucket, prefix)) => (bucket, prefix.to_string()),
        None => (rest, String::new()),
    }
}

/// Buffers JSON lines and writes them as one object on `finish`
#[derive(Debug)]
pub struct ObjectStoreSink {
    destination: CloudDestination,
    buffer: Vec<u8>,
    records: usize,
    written: Option<String>,
}

impl ObjectStoreSink {
    /// Create a sink writing to a destination
    pub fn new(destination: CloudDestination) -> Self {
        Self {
            destination,
            buffer: Vec::new(),
            records: 0,
            written: None,
        }
    }

    /// Full path of the written file, once finished
    pub fn written(&self) -> Option<&str> {
        self.written.as_deref()
    }
}

#[async_trait]
impl RecordSink for ObjectStoreSink {
    async fn emit(&mut self, record: OutputRecord) -> Result<()> {
        let line = record.to_json_line()?;
        self.buffer.extend_from_slice(line.as_bytes());
        self.buffer.push(b'\n');
        self.records += 1;
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        if self.written.is_some() {
            return Ok(());
        }

        let filename = build_partitioned_path(Utc::now());
        let data = Bytes::from(std::mem::take(&mut self.buffer));
        let path = self.destination.write(&filename, data).await?;

        info!("Wrote {} records to {path}", self.records);
        self.written = Some(path);
        Ok(())
    }
}
