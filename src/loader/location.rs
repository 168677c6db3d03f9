//! Parameter file locations (GCS, S3, R2, Azure, local)

use super::parser::parse_params;
use crate::error::{Error, Result};
use crate::types::ParamsFormat;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;
use tracing::debug;

/// A parameter file in an object store
#[derive(Debug, Clone)]
pub struct ParamsLocation {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Object path within the bucket/container
    path: ObjectPath,
    /// URL scheme (gs, s3, r2, az, file)
    scheme: String,
    /// Location as given, for error messages
    location: String,
}

impl ParamsLocation {
    /// Parse a location string and create the matching object store
    ///
    /// Supported formats:
    /// - `gs://bucket/path/params.json` - Google Cloud Storage
    /// - `s3://bucket/path/params.json` - AWS S3
    /// - `r2://bucket/path/params.json` - Cloudflare R2 (S3-compatible)
    /// - `az://container/path/params.json` - Azure Blob Storage
    /// - `/local/params.json`, `./params.json` or `file://...` - Local filesystem
    pub fn parse(location: &str) -> Result<Self> {
        if let Some(rest) = location.strip_prefix("gs://") {
            let (bucket, path) = split_bucket(location, rest)?;
            let store = GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()
                .map_err(|e| Error::load(location, format!("failed to create GCS client: {e}")))?;
            Ok(Self::new(Arc::new(store), path, "gs", location))
        } else if let Some(rest) = location.strip_prefix("s3://") {
            Self::parse_s3(location, rest, false)
        } else if let Some(rest) = location.strip_prefix("r2://") {
            Self::parse_s3(location, rest, true)
        } else if let Some(rest) = location.strip_prefix("az://") {
            let (container, path) = split_bucket(location, rest)?;
            let store = MicrosoftAzureBuilder::from_env()
                .with_container_name(container)
                .build()
                .map_err(|e| {
                    Error::load(location, format!("failed to create Azure client: {e}"))
                })?;
            Ok(Self::new(Arc::new(store), path, "az", location))
        } else {
            Self::parse_local(location)
        }
    }

    /// Use an existing object store (tests, embedding)
    pub fn with_store(store: Arc<dyn ObjectStore>, path: impl Into<String>) -> Self {
        let path = path.into();
        let location = format!("memory://{path}");
        Self::new(store, path, "memory", &location)
    }

    fn new(store: Arc<dyn ObjectStore>, path: impl Into<String>, scheme: &str, location: &str) -> Self {
        Self {
            store,
            path: ObjectPath::from(path.into()),
            scheme: scheme.to_string(),
            location: location.to_string(),
        }
    }

    /// Parse S3 or R2 location
    fn parse_s3(location: &str, rest: &str, is_r2: bool) -> Result<Self> {
        let scheme = if is_r2 { "r2" } else { "s3" };
        let (bucket, path) = split_bucket(location, rest)?;

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        // AWS_ENDPOINT is read by from_env(); R2 may also set R2_ENDPOINT_URL
        if is_r2 {
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::load(location, format!("failed to create {scheme} client: {e}")))?;

        Ok(Self::new(Arc::new(store), path, scheme, location))
    }

    /// Parse local filesystem path
    fn parse_local(location: &str) -> Result<Self> {
        let fs_path = location.strip_prefix("file://").unwrap_or(location);

        let path = ObjectPath::from_filesystem_path(fs_path)
            .map_err(|e| Error::load(location, format!("file not found or unreadable: {e}")))?;

        Ok(Self {
            store: Arc::new(LocalFileSystem::new()),
            path,
            scheme: "file".to_string(),
            location: location.to_string(),
        })
    }

    /// Get the scheme (gs, s3, r2, az, file, memory)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Get the object path within the store
    pub fn path(&self) -> &ObjectPath {
        &self.path
    }

    /// Get the location as given
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Read the whole object as UTF-8 text
    pub async fn read_text(&self) -> Result<String> {
        debug!("Reading parameter file {}", self.location);

        let result = self.store.get(&self.path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => Error::load(&self.location, "object not found"),
            other => Error::load(&self.location, other.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| Error::load(&self.location, e.to_string()))?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::load(&self.location, format!("not valid UTF-8: {e}")))
    }

    /// Read and parse the parameter list
    pub async fn load(&self, format: ParamsFormat) -> Result<Vec<String>> {
        let text = self.read_text().await?;
        parse_params(&text, format)
    }
}

/// Split `bucket/path/to/object` on the first `/`
fn split_bucket<'a>(location: &str, rest: &'a str) -> Result<(&'a str, &'a str)> {
    match rest.split_once('/') {
        Some((bucket, path)) if !bucket.is_empty() && !path.is_empty() => Ok((bucket, path)),
        _ => Err(Error::load(
            location,
            "expected <scheme>://<bucket>/<path to object>",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    #[test]
    fn test_split_bucket() {
        let (bucket, path) = split_bucket("gs://b/a/b.json", "b/a/b.json").unwrap();
        assert_eq!(bucket, "b");
        assert_eq!(path, "a/b.json");
    }

    #[test]
    fn test_split_bucket_without_path() {
        assert!(split_bucket("gs://bucket", "bucket").is_err());
        assert!(split_bucket("gs://bucket/", "bucket/").is_err());
        assert!(split_bucket("gs:///x", "/x").is_err());
    }

    #[test]
    fn test_gcs_location_object_path() {
        let location = "gs://my-bucket/dir/params.json";
        let rest = location.strip_prefix("gs://").unwrap();
        let (bucket, path) = split_bucket(location, rest).unwrap();
        assert_eq!(bucket, "my-bucket");

        let params = ParamsLocation::with_store(Arc::new(InMemory::new()), path);
        assert_eq!(params.scheme(), "memory");
        assert_eq!(params.path().as_ref(), "dir/params.json");
        assert_eq!(params.location(), "memory://dir/params.json");
    }

    #[test]
    fn test_parse_gcs_location_without_object() {
        let err = ParamsLocation::parse("gs://my-bucket").unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn test_parse_local_missing_file() {
        let err = ParamsLocation::parse("/nonexistent/dir/params.json").unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn test_parse_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("params.json");
        std::fs::write(&file, "[]").unwrap();

        let location = ParamsLocation::parse(file.to_str().unwrap()).unwrap();
        assert_eq!(location.scheme(), "file");
        assert!(location.location().ends_with("params.json"));
    }
}
