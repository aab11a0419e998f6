//! Content-addressed cover image storage
//!
//! Cover images are stored in pluggable object storage
//! (S3/MinIO/local filesystem/memory) under the BLAKE3 hash of their bytes.
//!
//! # Example
//!
//! ```rust,no_run
//! use cover_store::{CoverStore, ObjectStoreConfig};
//! use url::Url;
//!
//! # async fn example() -> Result<(), cover_store::CoverStoreError> {
//! let config = ObjectStoreConfig::Local { path: "/tmp/covers".into() };
//! let base = Url::parse("http://localhost:8080/covers/").unwrap();
//! let store = CoverStore::new(&config, base).await?;
//!
//! let stored = store.put(bytes::Bytes::from_static(b"...")).await?;
//! println!("{} -> {}", stored.key, stored.url);
//! # Ok(())
//! # }
//! ```

mod error;
mod key;
mod storage;
mod store;

pub use error::{CoverStoreError, Result};
pub use key::CoverKey;
pub use storage::ObjectStoreConfig;
pub use store::{sniff_content_type, CoverStore, StoredCover};
