//! Storage abstraction trait

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tubely_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Publish(err.to_string())
    }
}

/// Reject keys that could escape the store's root.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key '{}' contains invalid characters",
            key
        )));
    }
    Ok(())
}

/// A place finished assets are published to.
///
/// `put_object` is a single put with the whole payload in memory; there is no
/// retry and no multipart upload.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `key` and return its public URL.
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str)
        -> StorageResult<String>;

    /// Remove the object under `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Public URL an object under `key` is reachable at.
    fn public_url(&self, key: &str) -> String;
}
