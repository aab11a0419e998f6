//! Error types for the cover store.

/// Errors that can occur when working with the cover store.
#[derive(Debug, thiserror::Error)]
pub enum CoverStoreError {
    /// Object storage error
    #[error("object storage error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Key is not a content hash
    #[error("invalid cover key: {0}")]
    InvalidKey(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// S3 bucket not found - must be created before use
    #[error("S3 bucket '{0}' does not exist. Create it before starting the daemon.")]
    BucketNotFound(String),
}

/// Result type alias for cover store operations.
pub type Result<T> = std::result::Result<T, CoverStoreError>;
