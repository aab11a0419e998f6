//! Object storage backend abstraction (S3/MinIO/local filesystem/memory).

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use serde::{Deserialize, Serialize};

use crate::error::{CoverStoreError, Result};
use crate::key::CoverKey;

/// Configuration for the object storage backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectStoreConfig {
    /// In-memory storage (for testing)
    #[default]
    Memory,

    /// Local filesystem storage
    Local {
        /// Path to the storage directory
        path: PathBuf,
    },

    /// S3-compatible storage (AWS S3, MinIO, etc.)
    S3 {
        /// S3 endpoint URL (e.g., "http://localhost:9000" for MinIO)
        endpoint: String,
        /// Access key ID
        access_key: String,
        /// Secret access key
        secret_key: String,
        /// Bucket name
        bucket: String,
        /// Optional region (defaults to "us-east-1")
        region: Option<String>,
    },
}

/// Wrapper around the configured object storage backend.
#[derive(Debug, Clone)]
pub(crate) struct Storage {
    inner: Arc<dyn ObjectStore>,
}

impl Storage {
    /// Create a new storage backend from configuration.
    pub async fn new(config: &ObjectStoreConfig) -> Result<Self> {
        let inner: Arc<dyn ObjectStore> = match config {
            ObjectStoreConfig::Memory => Arc::new(InMemory::new()),

            ObjectStoreConfig::Local { path } => {
                tokio::fs::create_dir_all(path).await?;
                Arc::new(
                    LocalFileSystem::new_with_prefix(path)
                        .map_err(|e| CoverStoreError::InvalidConfig(e.to_string()))?,
                )
            }

            ObjectStoreConfig::S3 {
                endpoint,
                access_key,
                secret_key,
                bucket,
                region,
            } => {
                let store: Arc<dyn ObjectStore> = Arc::new(
                    AmazonS3Builder::new()
                        .with_endpoint(endpoint)
                        .with_access_key_id(access_key)
                        .with_secret_access_key(secret_key)
                        .with_bucket_name(bucket)
                        .with_region(region.as_deref().unwrap_or("us-east-1"))
                        .with_allow_http(endpoint.starts_with("http://"))
                        .build()
                        .map_err(|e| CoverStoreError::InvalidConfig(e.to_string()))?,
                );
                Self::check_bucket(store.as_ref(), bucket).await?;
                store
            }
        };

        Ok(Self { inner })
    }

    /// Fail fast when the bucket is missing instead of on the first upload.
    async fn check_bucket(store: &dyn ObjectStore, bucket: &str) -> Result<()> {
        use futures::TryStreamExt;

        let prefix = ObjectPath::from("");
        let mut stream = store.list(Some(&prefix));
        match stream.try_next().await {
            Ok(_) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => {
                Err(CoverStoreError::BucketNotFound(bucket.to_string()))
            }
            Err(e) if e.to_string().contains("NoSuchBucket") => {
                Err(CoverStoreError::BucketNotFound(bucket.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn cover_path(key: &CoverKey) -> ObjectPath {
        ObjectPath::from(format!("covers/{}", key))
    }

    pub async fn put_cover(&self, key: &CoverKey, data: Bytes) -> Result<()> {
        let path = Self::cover_path(key);
        self.inner.put(&path, PutPayload::from(data)).await?;
        Ok(())
    }

    pub async fn get_cover(&self, key: &CoverKey) -> Result<Option<Bytes>> {
        let path = Self::cover_path(key);
        match self.inner.get(&path).await {
            Ok(result) => Ok(Some(result.bytes().await?)),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn has_cover(&self, key: &CoverKey) -> Result<bool> {
        let path = Self::cover_path(key);
        match self.inner.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete_cover(&self, key: &CoverKey) -> Result<()> {
        let path = Self::cover_path(key);
        // Already gone is fine
        match self.inner.delete(&path).await {
            Ok(()) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = Storage::new(&ObjectStoreConfig::Memory).await.unwrap();
        let data = Bytes::from("hello pudding");
        let key = CoverKey::for_content(&data);

        storage.put_cover(&key, data.clone()).await.unwrap();
        assert_eq!(storage.get_cover(&key).await.unwrap().unwrap(), data);
        assert!(storage.has_cover(&key).await.unwrap());

        storage.delete_cover(&key).await.unwrap();
        assert!(!storage.has_cover(&key).await.unwrap());
        assert!(storage.get_cover(&key).await.unwrap().is_none());

        // deleting twice is not an error
        storage.delete_cover(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_local_storage() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ObjectStoreConfig::Local {
            path: temp_dir.path().to_path_buf(),
        };
        let storage = Storage::new(&config).await.unwrap();

        let data = Bytes::from("test data");
        let key = CoverKey::for_content(&data);
        storage.put_cover(&key, data.clone()).await.unwrap();

        let file_path = temp_dir.path().join("covers").join(key.as_str());
        assert!(file_path.exists());
        assert_eq!(storage.get_cover(&key).await.unwrap().unwrap(), data);
    }
}
