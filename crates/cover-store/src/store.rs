use bytes::Bytes;
use url::Url;

use crate::error::{CoverStoreError, Result};
use crate::key::CoverKey;
use crate::storage::{ObjectStoreConfig, Storage};

/// A stored cover image as reported back to uploaders.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredCover {
    pub key: CoverKey,
    pub url: String,
    pub size: usize,
}

/// Content-addressed cover image store.
///
/// Objects are keyed by the hash of their bytes and never by the uploaded
/// file name. Public URLs are `<public_base>/<key>`.
#[derive(Debug, Clone)]
pub struct CoverStore {
    storage: Storage,
    public_base: Url,
}

impl CoverStore {
    pub async fn new(config: &ObjectStoreConfig, public_base: Url) -> Result<Self> {
        let storage = Storage::new(config).await?;
        tracing::info!(public_base = %public_base, "cover store ready");
        Ok(Self {
            storage,
            public_base: with_trailing_slash(public_base),
        })
    }

    /// An in-memory store, handy for tests and ephemeral daemons.
    pub async fn memory(public_base: Url) -> Result<Self> {
        Self::new(&ObjectStoreConfig::Memory, public_base).await
    }

    /// Store `data`, returning its key. Storing identical bytes again is a no-op upsert.
    pub async fn put(&self, data: Bytes) -> Result<StoredCover> {
        let key = CoverKey::for_content(&data);
        let size = data.len();
        self.storage.put_cover(&key, data).await?;
        tracing::debug!(key = %key, size, "stored cover image");
        Ok(StoredCover {
            url: self.public_url(&key)?,
            key,
            size,
        })
    }

    pub async fn get(&self, key: &CoverKey) -> Result<Option<Bytes>> {
        self.storage.get_cover(key).await
    }

    pub async fn exists(&self, key: &CoverKey) -> Result<bool> {
        self.storage.has_cover(key).await
    }

    pub async fn delete(&self, key: &CoverKey) -> Result<()> {
        self.storage.delete_cover(key).await
    }

    pub fn public_url(&self, key: &CoverKey) -> Result<String> {
        self.public_base
            .join(key.as_str())
            .map(String::from)
            .map_err(|e| CoverStoreError::InvalidConfig(e.to_string()))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Guess an image content type from its leading bytes.
pub fn sniff_content_type(data: &[u8]) -> &'static str {
    match data {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "application/octet-stream",
    }
}
